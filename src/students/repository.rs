use sqlx::PgPool;

use crate::error::ApiError;
use crate::query::{bind_params, SQLQueryBuilder};
use crate::students::models::{CreateStudent, Student, StudentFilter, StudentWithGroup, UpdateStudent};

const STUDENT_COLUMNS: &str = "id, name, birth_date, gender, group_id, major, course_year";

/// Repository for database operations on students
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Create a new StudentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of students matching the filter, ordered by id
    pub async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, ApiError> {
        let mut builder = SQLQueryBuilder::new(&format!("SELECT {} FROM students", STUDENT_COLUMNS));
        builder
            .add_optional_int("group_id", filter.group_id)
            .add_optional_int("course_year", filter.course_year);
        if let Some(major) = &filter.major {
            builder.add_contains_filter("major", major);
        }
        builder
            .set_order("id")
            .set_pagination(filter.limit, filter.offset);

        let (sql, params) = builder.build();
        let students = bind_params(sqlx::query_as::<_, Student>(&sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// Find a student by ID, joined with its group's name
    pub async fn find_by_id(&self, id: i32) -> Result<Option<StudentWithGroup>, ApiError> {
        let student = sqlx::query_as::<_, StudentWithGroup>(
            r#"
            SELECT s.id, s.name, s.birth_date, s.gender, s.group_id, s.major, s.course_year,
                   g.name AS group_name
            FROM students s
            JOIN groups g ON g.id = s.group_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Insert a student, returning its id
    pub async fn create(&self, input: &CreateStudent) -> Result<i32, ApiError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO students (name, birth_date, gender, group_id, major, course_year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(input.birth_date)
        .bind(input.gender.trim())
        .bind(input.group_id)
        .bind(&input.major)
        .bind(input.course_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Apply a partial update; None if the student does not exist
    ///
    /// The row is locked while the merged values are written back.
    pub async fn update(&self, id: i32, patch: UpdateStudent) -> Result<Option<Student>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1 FOR UPDATE",
            STUDENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let updated = sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET name = $1, birth_date = $2, gender = $3, group_id = $4, major = $5, course_year = $6
            WHERE id = $7
            RETURNING {}
            "#,
            STUDENT_COLUMNS
        ))
        .bind(patch.name.map(|n| n.trim().to_string()).unwrap_or(existing.name))
        .bind(patch.birth_date.unwrap_or(existing.birth_date))
        .bind(patch.gender.map(|g| g.trim().to_string()).unwrap_or(existing.gender))
        .bind(patch.group_id.unwrap_or(existing.group_id))
        .bind(patch.major.or(existing.major))
        .bind(patch.course_year.or(existing.course_year))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    /// Delete a student; false if no row matched
    pub async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        Ok(crate::db::exists(&self.pool, "students", id).await?)
    }
}
