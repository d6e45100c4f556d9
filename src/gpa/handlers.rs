// HTTP handlers for GPA and ranking endpoints

use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::gpa::models::{GpaFilter, GpaResponse, RankingParams, StudentGpa};
use crate::AppState;

/// Weighted GPA over all of a student's grades
/// GET /students/{id}/gpa
#[utoipa::path(
    get,
    path = "/students/{id}/gpa",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student GPA; 0.0 without grades", body = GpaResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "gpa"
)]
pub async fn student_gpa(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i32>,
) -> Result<Json<GpaResponse>, ApiError> {
    let gpa = state.gpa.student_gpa(student_id, &GpaFilter::default()).await?;

    Ok(Json(GpaResponse {
        student_id,
        subject_id: None,
        gpa,
    }))
}

/// Weighted GPA of a student within one subject
/// GET /students/{id}/subjects/{subject_id}/gpa
#[utoipa::path(
    get,
    path = "/students/{id}/subjects/{subject_id}/gpa",
    params(
        ("id" = i32, Path, description = "Student ID"),
        ("subject_id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject GPA; 0.0 without grades", body = GpaResponse),
        (status = 404, description = "Student or subject not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "gpa"
)]
pub async fn student_subject_gpa(
    State(state): State<AppState>,
    ApiPath((student_id, subject_id)): ApiPath<(i32, i32)>,
) -> Result<Json<GpaResponse>, ApiError> {
    let gpa = state
        .gpa
        .student_gpa(student_id, &GpaFilter::subject(subject_id))
        .await?;

    Ok(Json(GpaResponse {
        student_id,
        subject_id: Some(subject_id),
        gpa,
    }))
}

/// Students ranked by GPA
/// GET /rankings
#[utoipa::path(
    get,
    path = "/rankings",
    params(RankingParams),
    responses(
        (status = 200, description = "Best GPA first, ties by student id", body = Vec<StudentGpa>),
        (status = 400, description = "Malformed filter", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "gpa"
)]
pub async fn rankings(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RankingParams>,
) -> Result<Json<Vec<StudentGpa>>, ApiError> {
    let filter = GpaFilter::from(params);
    tracing::debug!("Ranking with filter: {:?}", filter);

    let ranked = state.gpa.rankings(&filter).await?;
    Ok(Json(ranked))
}
