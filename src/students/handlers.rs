// HTTP handlers for student endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::CreatedResponse;
use crate::students::models::{
    CreateStudent, Student, StudentFilter, StudentQueryParams, StudentWithGroup, UpdateStudent,
};
use crate::AppState;

/// List students
/// GET /students
#[utoipa::path(
    get,
    path = "/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "One page of students", body = Vec<Student>),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StudentQueryParams>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let filter = StudentFilter::try_from(params)?;
    tracing::debug!("Listing students with filter: {:?}", filter);

    let students = state.students.list(&filter).await?;
    Ok(Json(students))
}

/// Get one student with its group name
/// GET /students/{id}
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentWithGroup),
        (status = 404, description = "Student not found", body = ErrorResponse, example = json!({"error": "Student with id 1 not found"}))
    ),
    security(("bearer_auth" = [])),
    tag = "students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<StudentWithGroup>, ApiError> {
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student", id))?;

    Ok(Json(student))
}

/// Create a student
/// POST /students
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = CreatedResponse),
        (status = 400, description = "Invalid input or unknown group", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateStudent>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    payload.validate()?;

    let id = state.students.create(&payload).await?;

    tracing::info!("Created student with id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}

/// Partially update a student
/// PATCH /students/{id}
#[utoipa::path(
    patch,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateStudent>,
) -> Result<Json<Student>, ApiError> {
    payload.validate()?;

    let student = state
        .students
        .update(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Student", id))?;

    tracing::info!("Updated student with id: {}", id);
    Ok(Json(student))
}

/// Delete a student together with their grades and attendance
/// DELETE /students/{id}
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.students.delete(id).await? {
        return Err(ApiError::not_found("Student", id));
    }

    tracing::info!("Deleted student with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
