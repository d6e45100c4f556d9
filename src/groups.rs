// Student groups: read-only over HTTP

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Group {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "MATH-21")]
    pub name: String,
    #[schema(example = "Faculty of Mathematics")]
    pub department: String,
}

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All groups ordered by id
    pub async fn list(&self) -> Result<Vec<Group>, ApiError> {
        let groups =
            sqlx::query_as::<_, Group>("SELECT id, name, department FROM groups ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(groups)
    }
}

/// List all groups
/// GET /groups
#[utoipa::path(
    get,
    path = "/groups",
    responses((status = 200, description = "All groups", body = Vec<Group>)),
    security(("bearer_auth" = [])),
    tag = "groups"
)]
pub async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = state.groups.list().await?;
    tracing::debug!("Retrieved {} groups", groups.len());
    Ok(Json(groups))
}
