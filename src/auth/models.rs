// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "teacher@school.edu")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Registration request DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "teacher@school.edu")]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    #[schema(example = "correct-horse")]
    pub password: String,
}

/// Login request DTO
///
/// No format rules here: a malformed email simply fails to match a user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "teacher@school.edu")]
    pub email: String,
    #[schema(example = "correct-horse")]
    pub password: String,
}

/// Registration response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = 1)]
    pub id: i32,
}

/// Login response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Emails are compared case-insensitively and stored lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_rejects_malformed_email() {
        let errors = register("not-an-email", "long-enough").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_register_accepts_simple_email() {
        assert!(register("a@b.com", "long-enough").validate().is_ok());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let errors = register("a@b.com", "short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_user_response_hides_hash() {
        let user = User {
            id: 3,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "email": "a@b.com" }));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Teacher@School.EDU "), "teacher@school.edu");
    }
}
