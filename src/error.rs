// Error handling module for the records API
// Provides centralized error types and HTTP response conversion

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use tracing::{debug, error, warn};

/// Main error type for the API
/// All record handlers return Result<T, ApiError>
///
/// Each variant maps to one HTTP status code. Internal causes are logged
/// and replaced by an opaque message before they reach the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level validation errors from the validator crate
    /// Maps to HTTP 400 Bad Request
    #[error("request validation failed")]
    ValidationError(validator::ValidationErrors),

    /// Malformed input that is not a field rule (bad id, bad date, bad body)
    /// Maps to HTTP 400 Bad Request
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found by ID
    /// Maps to HTTP 404 Not Found
    #[error("{resource} with id {id} not found")]
    NotFound { resource: String, id: String },

    /// Duplicate resource conflict
    /// Maps to HTTP 409 Conflict
    #[error("{message}")]
    Conflict { message: String },

    /// Database operation errors
    /// Maps to HTTP 500 Internal Server Error
    #[error("database error: {0}")]
    DatabaseError(sqlx::Error),
}

/// JSON body of every error response: `{"error": "..."}`
///
/// `details` is only present for field-level validation failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Student with id 1 not found")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_error_response();
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Shorthand for a 404 on a numeric id
    pub fn not_found(resource: &str, id: i32) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// Convert ApiError to HTTP status code and ErrorResponse
    ///
    /// Logging level follows severity: error! for 500s, warn! for
    /// conflicts, debug! for expected client errors.
    fn to_error_response(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Request validation failed".to_string(),
                        details: Some(
                            serde_json::to_value(errors).unwrap_or(serde_json::json!({})),
                        ),
                    },
                )
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message.clone()))
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(format!("{} with id {} not found", resource, id)),
                )
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);
                (StatusCode::CONFLICT, ErrorResponse::new(message.clone()))
            }
            ApiError::DatabaseError(db_error) => {
                // Full cause stays in the logs
                error!("Database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("A database error occurred"),
                )
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert sqlx errors to ApiError
///
/// Constraint violations are caused by the request, not the server:
/// a dangling reference or failed CHECK is a 400, a duplicate is a 409.
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_foreign_key_violation() {
                return ApiError::BadRequest("Referenced record does not exist".to_string());
            }
            if db_err.is_check_violation() {
                return ApiError::BadRequest("Value violates a data constraint".to_string());
            }
            if db_err.is_unique_violation() {
                return ApiError::Conflict {
                    message: "Record already exists".to_string(),
                };
            }
        }
        ApiError::DatabaseError(error)
    }
}

/// Convert validator errors to ApiError
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let (status, body) = body_json(ApiError::not_found("Student", 7)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Student with id 7 not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_bad_request_shape() {
        let (status, body) = body_json(ApiError::BadRequest("bad date".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "bad date" }));
    }

    #[tokio::test]
    async fn test_database_error_is_opaque() {
        let (status, body) = body_json(ApiError::DatabaseError(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "A database error occurred");
    }

    #[tokio::test]
    async fn test_unclassified_sqlx_error_is_opaque() {
        let (status, body) =
            body_json(ApiError::from(sqlx::Error::Protocol("secret stack trace".to_string())))
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("secret"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::ValidationError(validator::ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict { message: "dup".to_string() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
