use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};

/// A value bound to a `$n` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
}

/// SQL query builder for constructing parameterized queries
/// Builds a single SQL query with optional filters, grouping, ordering and pagination
///
/// Column names passed in are constants from the calling repository; every
/// caller-supplied value goes through a placeholder.
pub struct SQLQueryBuilder {
    base_query: String,
    where_clauses: Vec<String>,
    params: Vec<SqlParam>,
    group_by: Option<String>,
    order_clause: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl SQLQueryBuilder {
    /// Creates a builder on top of a `SELECT ... FROM ...` statement
    pub fn new(base_query: &str) -> Self {
        Self {
            base_query: base_query.trim().to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by: None,
            order_clause: None,
            limit: None,
            offset: None,
        }
    }

    fn push_param(&mut self, param: SqlParam) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Adds an exact-match filter `column = $n`
    pub fn add_eq_filter(&mut self, column: &str, value: SqlParam) -> &mut Self {
        let index = self.push_param(value);
        self.where_clauses.push(format!("{} = ${}", column, index));
        self
    }

    /// Adds an exact-match integer filter when a value is present
    pub fn add_optional_int(&mut self, column: &str, value: Option<i32>) -> &mut Self {
        if let Some(v) = value {
            self.add_eq_filter(column, SqlParam::Int(v));
        }
        self
    }

    /// Adds an exact-match text filter when a value is present
    pub fn add_optional_text(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.add_eq_filter(column, SqlParam::Text(v.to_string()));
        }
        self
    }

    /// Adds a case-insensitive substring filter
    /// Uses ILIKE for PostgreSQL case-insensitive pattern matching; `%` and `_`
    /// in the term match themselves
    pub fn add_contains_filter(&mut self, column: &str, term: &str) -> &mut Self {
        let pattern = format!("%{}%", escape_like(term));
        let index = self.push_param(SqlParam::Text(pattern));
        self.where_clauses
            .push(format!("{} ILIKE ${} ESCAPE '\\'", column, index));
        self
    }

    pub fn set_group_by(&mut self, columns: &str) -> &mut Self {
        self.group_by = Some(columns.to_string());
        self
    }

    pub fn set_order(&mut self, order: &str) -> &mut Self {
        self.order_clause = Some(order.to_string());
        self
    }

    /// Sets LIMIT and OFFSET
    pub fn set_pagination(&mut self, limit: u32, offset: u32) -> &mut Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Builds the final SQL query string with all parameters
    /// Returns a tuple of (query_string, parameters)
    pub fn build(&self) -> (String, Vec<SqlParam>) {
        let mut query = self.base_query.clone();

        if !self.where_clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref group_by) = self.group_by {
            query.push_str(" GROUP BY ");
            query.push_str(group_by);
        }

        if let Some(ref order) = self.order_clause {
            query.push_str(" ORDER BY ");
            query.push_str(order);
        }

        // Integers we own, so they are inlined rather than bound
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            query.push_str(&format!(" OFFSET {}", offset));
        }

        (query, self.params.clone())
    }
}

/// Escapes LIKE metacharacters with a backslash
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Binds every parameter, in order, onto a `query_as`
pub fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: Vec<SqlParam>,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(v),
            SqlParam::Text(v) => query.bind(v),
        };
    }
    query
}

/// Trims a free-text query parameter, None if nothing is left
pub fn normalize_string(s: Option<String>) -> Option<String> {
    s.and_then(|s| {
        let trimmed = s.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
