// HTTP handlers for authentication endpoints

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, UserResponse},
};
use crate::AppState;

/// Register a new user
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Malformed email or short password", body = String, example = json!({"error": "invalid email"})),
        (status = 409, description = "Email already registered", body = String, example = json!({"error": "Email already exists"}))
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = state.auth_service.register(&request.email, &request.password).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// Login a user
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Unknown email or wrong password", body = String, example = json!({"error": "Invalid email or password"}))
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(request) = payload?;

    let token = state.auth_service.login(&request.email, &request.password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Get current user information
/// GET /users/me
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = String, example = json!({"error": "Missing authentication token"})),
        (status = 404, description = "User no longer exists", body = String, example = json!({"error": "User with id 1 not found"}))
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let current = state.auth_service.get_current_user(user.user_id).await?;
    Ok(Json(current))
}
