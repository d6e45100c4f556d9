// Subjects: read-only over HTTP, the name doubles as the display label

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Linear Algebra")]
    pub name: String,
}

#[derive(Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All subjects ordered by name
    pub async fn list(&self) -> Result<Vec<Subject>, ApiError> {
        let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(subjects)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        Ok(crate::db::exists(&self.pool, "subjects", id).await?)
    }
}

/// List all subjects
/// GET /subjects
#[utoipa::path(
    get,
    path = "/subjects",
    responses((status = 200, description = "All subjects", body = Vec<Subject>)),
    security(("bearer_auth" = [])),
    tag = "subjects"
)]
pub async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, ApiError> {
    let subjects = state.subjects.list().await?;
    tracing::debug!("Retrieved {} subjects", subjects.len());
    Ok(Json(subjects))
}
