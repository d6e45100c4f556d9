// Class schedule models; times of day travel as HH:MM

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ApiError;
use crate::formats::clock_time;
use crate::validation::validate_time_range;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub group_id: i32,
    #[schema(example = "Linear Algebra")]
    pub subject: String,
    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    #[schema(example = 1)]
    pub group_id: i32,

    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    #[schema(example = "Linear Algebra")]
    pub subject: String,

    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,

    #[serde(with = "clock_time")]
    #[schema(value_type = String, example = "10:30")]
    pub end_time: NaiveTime,
}

/// Partial update; the merged slot must still end after it starts
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    pub group_id: Option<i32>,

    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    pub subject: Option<String>,

    #[serde(default, deserialize_with = "clock_time::option::deserialize")]
    #[schema(value_type = Option<String>, example = "09:00")]
    pub start_time: Option<NaiveTime>,

    #[serde(default, deserialize_with = "clock_time::option::deserialize")]
    #[schema(value_type = Option<String>, example = "10:30")]
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleQueryParams {
    /// Only slots of this group
    pub group_id: Option<i32>,
}

/// 400 unless `end` is strictly after `start`
pub fn check_slot(start: NaiveTime, end: NaiveTime) -> Result<(), ApiError> {
    validate_time_range(start, end)
        .map_err(|_| ApiError::BadRequest("end_time must be after start_time".to_string()))
}
