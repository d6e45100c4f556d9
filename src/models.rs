// Response shapes shared across record modules

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by every create endpoint: `{"id": <new id>}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = 1)]
    pub id: i32,
}

impl From<i32> for CreatedResponse {
    fn from(id: i32) -> Self {
        Self { id }
    }
}

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a client may request
pub const MAX_LIMIT: u32 = 100;
