// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{normalize_email, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Authentication service coordinating all auth operations
pub struct AuthService {
    user_repo: UserRepository,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user, returning its id
    ///
    /// The request is already validated by the handler.
    pub async fn register(&self, email: &str, password: &str) -> Result<i32, AuthError> {
        let email = normalize_email(email);
        let password = password.to_owned();

        let hash = tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
            .await
            .map_err(|_| AuthError::PasswordHashError)??;

        let user_id = self.user_repo.insert(&email, &hash).await?;
        tracing::info!("Registered user {}", user_id);

        Ok(user_id)
    }

    /// Check credentials and issue a token
    ///
    /// Unknown email and wrong password both end in InvalidCredentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.user_repo.find_by_email(&normalize_email(email)).await?;
        let password = password.to_owned();

        let Some(user) = user else {
            tokio::task::spawn_blocking(move || PasswordService::verify_against_dummy(&password))
                .await
                .map_err(|_| AuthError::PasswordHashError)?;
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || {
            PasswordService::verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|_| AuthError::PasswordHashError)??;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!("User {} logged in", user.id);
        self.token_service.generate_token(user.id)
    }

    /// Get current user information
    pub async fn get_current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(AuthError::UserNotFound(user_id))
    }
}
