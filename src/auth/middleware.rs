// Authentication middleware for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::TokenService};

/// Identity attached to a request by `require_auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Pull the bearer token out of an Authorization header value
///
/// The scheme name is case-insensitive (RFC 7235).
fn bearer_token(value: &str) -> Result<&str, AuthError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Middleware guarding every protected route
///
/// On success the decoded user is stored in the request extensions and the
/// request continues; on any failure the handler is never called.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let endpoint = request.uri().path().to_string();

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            warn!("Missing Authorization header for endpoint: {}", endpoint);
            AuthError::MissingToken
        })?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = bearer_token(header_value).map_err(|e| {
        warn!("Malformed Authorization header for endpoint: {}", endpoint);
        e
    })?;

    let claims = tokens.validate_token(token)?;

    debug!("Authenticated user_id={} endpoint={}", claims.user_id, endpoint);
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}

/// Handlers behind `require_auth` take the caller's identity with this extractor
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    const SECRET: &str = "test_secret_key_for_testing_purposes";

    fn test_tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, 3600))
    }

    /// Router whose only handler records that it ran
    fn guarded_router(tokens: Arc<TokenService>, reached: Arc<AtomicBool>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |user: AuthenticatedUser| {
                    let reached = reached.clone();
                    async move {
                        reached.store(true, Ordering::SeqCst);
                        user.user_id.to_string()
                    }
                }),
            )
            .route_layer(from_fn_with_state(tokens, require_auth))
    }

    async fn call(auth: Option<&str>) -> (StatusCode, bool) {
        let reached = Arc::new(AtomicBool::new(false));
        let app = guarded_router(test_tokens(), reached.clone());

        let mut builder = HttpRequest::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

        (response.status(), reached.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_missing_header_never_reaches_handler() {
        let (status, reached) = call(None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!reached);
    }

    #[tokio::test]
    async fn test_malformed_headers_rejected() {
        for value in ["token_without_bearer", "Basic dXNlcjpwYXNz", "Bearer", "Bearer a b", ""] {
            let (status, reached) = call(Some(value)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", value);
            assert!(!reached);
        }
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let (status, reached) = call(Some("Bearer not.a.valid.jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!reached);
    }

    #[tokio::test]
    async fn test_foreign_secret_rejected() {
        let token = TokenService::new("another-secret", 3600).generate_token(5).unwrap();
        let (status, reached) = call(Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!reached);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_user() {
        let reached = Arc::new(AtomicBool::new(false));
        let tokens = test_tokens();
        let token = tokens.generate_token(42).unwrap();
        let app = guarded_router(tokens, reached.clone());

        let request = HttpRequest::builder()
            .uri("/protected")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(reached.load(Ordering::SeqCst));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn test_lowercase_scheme_accepted() {
        let token = test_tokens().generate_token(7).unwrap();
        let (status, reached) = call(Some(&format!("bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(reached);
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_rejects() {
        let req = HttpRequest::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("BEARER abc").unwrap(), "abc");
        assert!(bearer_token("Bearer").is_err());
        assert!(bearer_token("Bearerabc").is_err());
    }
}
