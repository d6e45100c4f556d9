use sqlx::PgPool;

use crate::coursework::models::{Assignment, CreateAssignment, CreateGrade};
use crate::error::ApiError;
use crate::query::{bind_params, SQLQueryBuilder};

#[derive(Clone)]
pub struct CourseworkRepository {
    pool: PgPool,
}

impl CourseworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assignments, newest first; `subject_name` must already be lower-cased
    pub async fn list_assignments(
        &self,
        subject_id: Option<i32>,
        subject_name: Option<&str>,
    ) -> Result<Vec<Assignment>, ApiError> {
        let mut builder = SQLQueryBuilder::new(
            r#"
            SELECT a.id, a.name, a.subject_id, s.name AS subject_name, a.weight, a.date
            FROM assignments a
            JOIN subjects s ON s.id = a.subject_id
            "#,
        );
        builder
            .add_optional_int("a.subject_id", subject_id)
            .add_optional_text("LOWER(s.name)", subject_name)
            .set_order("a.date DESC, a.id");

        let (sql, params) = builder.build();
        let assignments = bind_params(sqlx::query_as::<_, Assignment>(&sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(assignments)
    }

    pub async fn create_assignment(&self, input: &CreateAssignment) -> Result<i32, ApiError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO assignments (name, subject_id, weight, date) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(input.name.trim())
        .bind(input.subject_id)
        .bind(input.weight)
        .bind(input.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn create_grade(&self, input: &CreateGrade) -> Result<i32, ApiError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO grades (student_id, assignment_id, mark) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(input.student_id)
        .bind(input.assignment_id)
        .bind(input.mark)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
