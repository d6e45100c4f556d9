// HTTP handlers for schedule endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::CreatedResponse;
use crate::schedules::models::{
    check_slot, CreateSchedule, Schedule, ScheduleQueryParams, UpdateSchedule,
};
use crate::AppState;

/// GET /schedules
#[utoipa::path(
    get,
    path = "/schedules",
    params(ScheduleQueryParams),
    responses((status = 200, description = "Schedule slots", body = Vec<Schedule>)),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ScheduleQueryParams>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let slots = state.schedules.list(params.group_id).await?;
    tracing::debug!("Retrieved {} schedule slots", slots.len());
    Ok(Json(slots))
}

/// GET /schedules/{id}
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule slot ID")),
    responses(
        (status = 200, description = "Slot found", body = Schedule),
        (status = 404, description = "Slot not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Schedule>, ApiError> {
    state
        .schedules
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Schedule", id))
}

/// POST /schedules
#[utoipa::path(
    post,
    path = "/schedules",
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Slot created", body = CreatedResponse),
        (status = 400, description = "Bad time format, inverted slot or unknown group", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateSchedule>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    payload.validate()?;
    check_slot(payload.start_time, payload.end_time)?;

    let id = state.schedules.create(&payload).await?;

    tracing::info!("Created schedule slot with id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}

/// PATCH /schedules/{id}
#[utoipa::path(
    patch,
    path = "/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule slot ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Slot updated", body = Schedule),
        (status = 400, description = "Bad time format or inverted slot", body = ErrorResponse),
        (status = 404, description = "Slot not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateSchedule>,
) -> Result<Json<Schedule>, ApiError> {
    payload.validate()?;

    let slot = state
        .schedules
        .update(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Schedule", id))?;

    tracing::info!("Updated schedule slot with id: {}", id);
    Ok(Json(slot))
}

/// DELETE /schedules/{id}
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule slot ID")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 404, description = "Slot not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.schedules.delete(id).await? {
        return Err(ApiError::not_found("Schedule", id));
    }

    tracing::info!("Deleted schedule slot with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
