use sqlx::PgPool;

use crate::attendance::models::{Attendance, AttendanceFilter, CreateAttendance, UpdateAttendance};
use crate::error::ApiError;
use crate::query::{bind_params, SQLQueryBuilder};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records matching every given filter, ordered by visit day then id
    pub async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<Attendance>, ApiError> {
        let mut builder = SQLQueryBuilder::new(
            r#"
            SELECT a.id, a.student_id, a.subject_id, a.visit_day, a.visited
            FROM attendance a
            JOIN subjects s ON s.id = a.subject_id
            "#,
        );
        builder
            .add_optional_int("a.student_id", filter.student_id)
            .add_optional_int("a.subject_id", filter.subject_id)
            .add_optional_text(
                "LOWER(s.name)",
                filter.subject_name.as_deref().map(str::to_lowercase).as_deref(),
            )
            .set_order("a.visit_day, a.id");

        let (sql, params) = builder.build();
        let records = bind_params(sqlx::query_as::<_, Attendance>(&sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    pub async fn create(&self, input: &CreateAttendance) -> Result<i32, ApiError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO attendance (student_id, subject_id, visit_day, visited)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.student_id)
        .bind(input.subject_id)
        .bind(input.visit_day)
        .bind(input.visited)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(
        &self,
        id: i32,
        patch: UpdateAttendance,
    ) -> Result<Option<Attendance>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Attendance>(
            "SELECT id, student_id, subject_id, visit_day, visited FROM attendance WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let updated = sqlx::query_as::<_, Attendance>(
            r#"
            UPDATE attendance
            SET student_id = $1, subject_id = $2, visit_day = $3, visited = $4
            WHERE id = $5
            RETURNING id, student_id, subject_id, visit_day, visited
            "#,
        )
        .bind(patch.student_id.unwrap_or(existing.student_id))
        .bind(patch.subject_id.unwrap_or(existing.subject_id))
        .bind(patch.visit_day.unwrap_or(existing.visit_day))
        .bind(patch.visited.unwrap_or(existing.visited))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
