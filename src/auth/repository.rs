// Persistence for registered accounts

use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};

use crate::auth::{error::AuthError, models::User};

const USER_COLUMNS: &str = "id, email, password_hash, created_at";

/// Accounts table access; emails arrive already lower-cased
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new account and return its id
    ///
    /// The case-insensitive unique index on email turns a second
    /// registration into `EmailAlreadyExists`.
    pub async fn insert(&self, email: &str, password_hash: &str) -> Result<i32, AuthError> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_insert_error)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let query = select_user("LOWER(email) = LOWER($1)");
        self.fetch_optional(sqlx::query_as::<Postgres, User>(&query).bind(email)).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let query = select_user("id = $1");
        self.fetch_optional(sqlx::query_as::<Postgres, User>(&query).bind(id)).await
    }

    async fn fetch_optional<'q>(
        &self,
        query: QueryAs<'q, Postgres, User, PgArguments>,
    ) -> Result<Option<User>, AuthError> {
        Ok(query.fetch_optional(&self.pool).await?)
    }
}

fn select_user(condition: &str) -> String {
    format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, condition)
}

fn classify_insert_error(error: sqlx::Error) -> AuthError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AuthError::EmailAlreadyExists
        }
        _ => AuthError::from(error),
    }
}
