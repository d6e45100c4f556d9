// Password hashing and verification

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Argon2id with the crate's default cost, which lands in the tens of
/// milliseconds per hash. Both operations are CPU-bound; async callers
/// run them through `spawn_blocking`.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt, returning a PHC string
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored PHC hash
    ///
    /// Returns Ok(false) on mismatch; Err only if the stored hash is unreadable.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Burn the same amount of work as a real verification
    ///
    /// Used when the email is unknown so response time does not reveal
    /// whether an account exists.
    pub fn verify_against_dummy(password: &str) {
        static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
        let dummy = DUMMY_HASH.get_or_init(|| Self::hash_password("timing-equalizer").ok());
        if let Some(hash) = dummy {
            let _ = Self::verify_password(password, hash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = PasswordService::hash_password("correct-horse").unwrap();
        assert_ne!(hash, "correct-horse");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = PasswordService::hash_password("correct-horse").unwrap();
        assert!(PasswordService::verify_password("correct-horse", &hash).unwrap());
        assert!(!PasswordService::verify_password("wrong-horse", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let first = PasswordService::hash_password("same-password").unwrap();
        let second = PasswordService::hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_unreadable_hash_is_an_error() {
        assert!(matches!(
            PasswordService::verify_password("anything", "plaintext"),
            Err(AuthError::PasswordHashError)
        ));
    }

    #[test]
    fn test_dummy_verification_does_not_panic() {
        PasswordService::verify_against_dummy("whatever");
    }
}
