// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// The only algorithm tokens are signed and accepted with
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService from the server-held secret
    pub fn new(secret: &str, token_duration: i64) -> Self {
        // Validation::new pins the accepted algorithm list to exactly HS256
        let validation = Validation::new(ALGORITHM);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_duration,
        }
    }

    /// Issue a signed token for a user
    pub fn generate_token(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            user_id,
            iat: now,
            exp: now + self.token_duration,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "test_secret_key_for_testing_purposes";

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new(SECRET, 3600)
    }

    fn sign_with(header: Header, claims: &Claims, secret: &str) -> String {
        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_token_lifetime_follows_configuration() {
        let service = test_token_service();
        let token = service.generate_token(1).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_carries_user_id() {
        let service = test_token_service();
        let token = service.generate_token(42).unwrap();
        assert_eq!(service.validate_token(&token).unwrap().user_id, 42);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.validate_token("").is_err());
        assert!(service.validate_token("not.a.token").is_err());
        assert!(service.validate_token("invalid_token_format").is_err());
        assert!(service
            .validate_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1", 3600);
        let service2 = TokenService::new("secret2", 3600);

        let token = service1.generate_token(1).unwrap();

        assert!(service1.validate_token(&token).is_ok());
        assert!(matches!(
            service2.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            iat: now,
            exp: now + 600,
        };

        // Same secret, different HMAC variant
        let token = sign_with(Header::new(Algorithm::HS512), &claims, SECRET);

        assert!(matches!(
            test_token_service().validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            iat: now - 10_000,
            exp: now - 5_000,
        };
        let token = sign_with(Header::new(Algorithm::HS256), &claims, SECRET);

        assert!(matches!(
            test_token_service().validate_token(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    proptest! {
        #[test]
        fn prop_issued_tokens_validate(user_id in 1i32..1_000_000) {
            let service = test_token_service();
            let token = service.generate_token(user_id)?;
            let claims = service.validate_token(&token)?;
            prop_assert_eq!(claims.user_id, user_id);
        }

        #[test]
        fn prop_random_strings_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            prop_assert!(test_token_service().validate_token(&malformed).is_err());
        }
    }
}
