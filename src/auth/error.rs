// Authentication error types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Covers both an unknown email and a wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Malformed Authorization header")]
    MalformedHeader,
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("User with id {0} not found")]
    UserNotFound(i32),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Password hashing error")]
    PasswordHashError,
    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken
            | AuthError::MalformedHeader => warn!("Rejected request: {}", self),
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::DatabaseError(msg) => error!("Database error in auth: {}", msg),
            AuthError::PasswordHashError => error!("Password hashing error"),
            AuthError::TokenGenerationError(msg) => error!("Token generation error: {}", msg),
            _ => {}
        }

        let body = Json(json!({
            "error": self.error_message(),
        }));

        (status, body).into_response()
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::MissingToken
            | AuthError::MalformedHeader => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a descriptive error message for this error
    /// This message is safe to send to clients (no sensitive data)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::DatabaseError(_)
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| format!("invalid {}", field))
            .collect();
        fields.sort();
        AuthError::ValidationError(fields.join(", "))
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::ValidationError(rejection.body_text())
    }
}
