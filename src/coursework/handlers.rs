// HTTP handlers for assignment and grade endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::coursework::models::{Assignment, AssignmentQueryParams, CreateAssignment, CreateGrade};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::models::CreatedResponse;
use crate::AppState;

/// GET /assignments
#[utoipa::path(
    get,
    path = "/assignments",
    params(AssignmentQueryParams),
    responses((status = 200, description = "Assignments, newest first", body = Vec<Assignment>)),
    security(("bearer_auth" = [])),
    tag = "coursework"
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AssignmentQueryParams>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let subject_name = params.subject_name();
    let assignments = state
        .coursework
        .list_assignments(params.subject_id, subject_name.as_deref())
        .await?;

    tracing::debug!("Retrieved {} assignments", assignments.len());
    Ok(Json(assignments))
}

/// POST /assignments
#[utoipa::path(
    post,
    path = "/assignments",
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment created", body = CreatedResponse),
        (status = 400, description = "Invalid input or unknown subject", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "coursework"
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAssignment>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    payload.validate()?;

    let id = state.coursework.create_assignment(&payload).await?;

    tracing::info!("Created assignment with id: {}", id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}

/// POST /grades
#[utoipa::path(
    post,
    path = "/grades",
    request_body = CreateGrade,
    responses(
        (status = 201, description = "Grade recorded", body = CreatedResponse),
        (status = 400, description = "Negative mark or unknown student/assignment", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "coursework"
)]
pub async fn create_grade(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateGrade>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    payload.validate()?;

    let id = state.coursework.create_grade(&payload).await?;

    tracing::info!("Recorded grade {} for student {}", id, payload.student_id);
    Ok((StatusCode::CREATED, Json(CreatedResponse::from(id))))
}
