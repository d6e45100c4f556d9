// Runtime configuration
// Built once at startup and handed to the components that need it

use thiserror::Error;

/// Default token lifetime: 24 hours
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide configuration
///
/// | Variable | Default |
/// |----------|---------|
/// | `DATABASE_URL` | required |
/// | `JWT_SECRET` (or `SECRET_KEY`) | required |
/// | `HOST` | `0.0.0.0` |
/// | `PORT` | `8080` |
/// | `TOKEN_TTL_SECONDS` | `86400` |
/// | `DATABASE_MAX_CONNECTIONS` | `5` |
/// | `CORS_ALLOWED_ORIGINS` | any origin |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub token_ttl_seconds: i64,
    pub database_max_connections: u32,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = non_empty("JWT_SECRET")
            .or_else(|| non_empty("SECRET_KEY"))
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let host = non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .trim_start_matches(':')
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?,
            None => 8080,
        };

        let token_ttl_seconds = match non_empty("TOKEN_TTL_SECONDS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(ttl) if ttl > 0 => ttl,
                _ => return Err(ConfigError::Invalid { key: "TOKEN_TTL_SECONDS", value: raw }),
            },
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let database_max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
            token_ttl_seconds,
            database_max_connections,
            cors_allowed_origins,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_seconds, 86_400);
        assert_eq!(config.database_max_connections, 5);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_database_url() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_missing_secret() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_secret_key_fallback() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("SECRET_KEY", "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_secret, "legacy");
    }

    #[test]
    fn test_port_with_colon_prefix() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("JWT_SECRET", "secret"),
            ("PORT", ":3000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = [
            ("DATABASE_URL", "postgres://localhost/records"),
            ("JWT_SECRET", "secret"),
        ];

        let mut pairs = base.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));

        let mut pairs = base.to_vec();
        pairs.push(("TOKEN_TTL_SECONDS", "0"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::Invalid { key: "TOKEN_TTL_SECONDS", .. })
        ));
    }

    #[test]
    fn test_cors_origins_split() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/records"),
            ("JWT_SECRET", "secret"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://example.org,"),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173".to_string(), "https://example.org".to_string()]
        );
    }
}
