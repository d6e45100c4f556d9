use sqlx::PgPool;

use crate::error::ApiError;
use crate::gpa::models::{GpaFilter, StudentTotals, WeightedTotals};
use crate::query::{bind_params, SQLQueryBuilder};

/// Both sums come back as BIGINT so large mark × weight products cannot overflow
const TOTALS_SELECT: &str = r#"
    COALESCE(SUM(g.mark::BIGINT * a.weight), 0)::BIGINT AS weighted_sum,
    COALESCE(SUM(a.weight), 0)::BIGINT AS total_weight
    FROM grades g
    JOIN assignments a ON a.id = g.assignment_id
    JOIN subjects s ON s.id = a.subject_id
    JOIN students st ON st.id = g.student_id
"#;

/// Aggregate queries over grades × assignments
#[derive(Clone)]
pub struct GpaRepository {
    pool: PgPool,
}

fn apply_filter(builder: &mut SQLQueryBuilder, filter: &GpaFilter) {
    let subject_name = filter.subject_name.as_deref().map(str::to_lowercase);
    builder
        .add_optional_int("st.group_id", filter.group_id)
        .add_optional_int("a.subject_id", filter.subject_id)
        .add_optional_text("LOWER(s.name)", subject_name.as_deref());
}

impl GpaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Weighted totals for one student in a single aggregate statement
    pub async fn student_totals(
        &self,
        student_id: i32,
        filter: &GpaFilter,
    ) -> Result<WeightedTotals, ApiError> {
        let mut builder = SQLQueryBuilder::new(&format!("SELECT {}", TOTALS_SELECT));
        builder.add_optional_int("g.student_id", Some(student_id));
        apply_filter(&mut builder, filter);

        let (sql, params) = builder.build();
        let totals = bind_params(sqlx::query_as::<_, WeightedTotals>(&sql), params)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }

    /// Weighted totals for every student with at least one matching grade
    pub async fn ranking_totals(&self, filter: &GpaFilter) -> Result<Vec<StudentTotals>, ApiError> {
        let mut builder =
            SQLQueryBuilder::new(&format!("SELECT g.student_id, {}", TOTALS_SELECT));
        apply_filter(&mut builder, filter);
        builder.set_group_by("g.student_id");

        let (sql, params) = builder.build();
        let rows = bind_params(sqlx::query_as::<_, StudentTotals>(&sql), params)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_columns() {
        let mut builder = SQLQueryBuilder::new("SELECT 1 FROM grades g");
        let filter = GpaFilter {
            group_id: Some(1),
            subject_id: None,
            subject_name: Some("Physics".to_string()),
        };
        apply_filter(&mut builder, &filter);

        let (sql, params) = builder.build();
        assert!(sql.ends_with("WHERE st.group_id = $1 AND LOWER(s.name) = $2"));
        assert_eq!(
            params,
            vec![
                crate::query::SqlParam::Int(1),
                crate::query::SqlParam::Text("physics".to_string())
            ]
        );
    }
}
