// HTTP handlers for attendance endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::attendance::models::{
    Attendance, AttendanceFilter, AttendanceQueryParams, CreateAttendance, UpdateAttendance,
};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::CreatedResponse;
use crate::AppState;

/// GET /attendance
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceQueryParams),
    responses((status = 200, description = "Matching attendance records", body = Vec<Attendance>)),
    security(("bearer_auth" = [])),
    tag = "attendance"
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AttendanceQueryParams>,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    let filter = AttendanceFilter::from(params);
    tracing::debug!("Listing attendance with filter: {:?}", filter);

    let records = state.attendance.list(&filter).await?;
    Ok(Json(records))
}

/// POST /attendance
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = CreatedResponse),
        (status = 400, description = "Bad date or unknown student/subject", body = ErrorResponse, example = json!({"error": "Referenced record does not exist"}))
    ),
    security(("bearer_auth" = [])),
    tag = "attendance"
)]
pub async fn create_attendance(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAttendance>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.attendance.create(&payload).await?;

    tracing::info!("Recorded attendance with id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}

/// PATCH /attendance/{id}
#[utoipa::path(
    patch,
    path = "/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Record updated", body = Attendance),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "attendance"
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateAttendance>,
) -> Result<Json<Attendance>, ApiError> {
    let record = state
        .attendance
        .update(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Attendance", id))?;

    tracing::info!("Updated attendance with id: {}", id);
    Ok(Json(record))
}

/// DELETE /attendance/{id}
#[utoipa::path(
    delete,
    path = "/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "attendance"
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.attendance.delete(id).await? {
        return Err(ApiError::not_found("Attendance", id));
    }

    tracing::info!("Deleted attendance with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
