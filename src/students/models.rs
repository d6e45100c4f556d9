// Student data models and request DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ApiError;
use crate::formats::dotted_date;
use crate::models::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::query::normalize_string;

/// Student database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "10.12.2004")]
    pub birth_date: NaiveDate,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(example = 1)]
    pub group_id: i32,
    #[schema(example = "Mathematics")]
    pub major: Option<String>,
    #[schema(example = 2)]
    pub course_year: Option<i32>,
}

/// Single-student read: the student plus the owning group's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentWithGroup {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub student: Student,
    #[schema(example = "MATH-21")]
    pub group_name: String,
}

/// Request body for POST /students
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(
        custom = "crate::validation::validate_not_blank",
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "10.12.2004")]
    pub birth_date: NaiveDate,

    #[validate(
        custom = "crate::validation::validate_not_blank",
        length(max = 32, message = "Gender must be at most 32 characters")
    )]
    #[schema(example = "female")]
    pub gender: String,

    #[schema(example = 1)]
    pub group_id: i32,

    #[validate(length(max = 255))]
    pub major: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Course year must be between 1 and 8"))]
    pub course_year: Option<i32>,
}

/// Request body for PATCH /students/{id}; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "dotted_date::option::deserialize")]
    #[schema(value_type = Option<String>, example = "10.12.2004")]
    pub birth_date: Option<NaiveDate>,

    #[validate(custom = "crate::validation::validate_not_blank", length(max = 32))]
    pub gender: Option<String>,

    pub group_id: Option<i32>,

    #[validate(length(max = 255))]
    pub major: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Course year must be between 1 and 8"))]
    pub course_year: Option<i32>,
}

/// Query string for GET /students
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQueryParams {
    /// Only students of this group
    pub group_id: Option<i32>,
    /// Case-insensitive substring of the major
    pub major: Option<String>,
    /// Only students in this course year
    pub course_year: Option<i32>,
    /// Page size, 1..=100 (default 20)
    pub limit: Option<u32>,
    /// Rows to skip (default 0)
    pub offset: Option<u32>,
}

/// Validated list filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFilter {
    pub group_id: Option<i32>,
    pub major: Option<String>,
    pub course_year: Option<i32>,
    pub limit: u32,
    pub offset: u32,
}

impl TryFrom<StudentQueryParams> for StudentFilter {
    type Error = ApiError;

    fn try_from(params: StudentQueryParams) -> Result<Self, Self::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }

        Ok(Self {
            group_id: params.group_id,
            major: normalize_string(params.major),
            course_year: params.course_year,
            limit,
            offset: params.offset.unwrap_or(0),
        })
    }
}
