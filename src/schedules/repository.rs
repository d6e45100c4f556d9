use sqlx::PgPool;

use crate::error::ApiError;
use crate::query::{bind_params, SQLQueryBuilder};
use crate::schedules::models::{check_slot, CreateSchedule, Schedule, UpdateSchedule};

const SCHEDULE_COLUMNS: &str = "id, group_id, subject, start_time, end_time";

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Slots ordered by group then start time
    pub async fn list(&self, group_id: Option<i32>) -> Result<Vec<Schedule>, ApiError> {
        let mut builder = SQLQueryBuilder::new(&format!("SELECT {} FROM schedule", SCHEDULE_COLUMNS));
        builder
            .add_optional_int("group_id", group_id)
            .set_order("group_id, start_time, id");

        let (sql, params) = builder.build();
        let slots = bind_params(sqlx::query_as::<_, Schedule>(&sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(slots)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Schedule>, ApiError> {
        let slot = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedule WHERE id = $1",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn create(&self, input: &CreateSchedule) -> Result<i32, ApiError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO schedule (group_id, subject, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.group_id)
        .bind(input.subject.trim())
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Merge the patch into the stored slot and write it back
    ///
    /// The merged times are checked before the write, so a patch that
    /// moves only one end of the slot cannot invert it.
    pub async fn update(&self, id: i32, patch: UpdateSchedule) -> Result<Option<Schedule>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedule WHERE id = $1 FOR UPDATE",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let start_time = patch.start_time.unwrap_or(existing.start_time);
        let end_time = patch.end_time.unwrap_or(existing.end_time);
        check_slot(start_time, end_time)?;

        let updated = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            UPDATE schedule
            SET group_id = $1, subject = $2, start_time = $3, end_time = $4
            WHERE id = $5
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(patch.group_id.unwrap_or(existing.group_id))
        .bind(patch.subject.map(|s| s.trim().to_string()).unwrap_or(existing.subject))
        .bind(start_time)
        .bind(end_time)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM schedule WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
