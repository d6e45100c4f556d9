// Attendance models; visit days travel as DD.MM.YYYY

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::formats::dotted_date;
use crate::query::normalize_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = 1)]
    pub subject_id: i32,
    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "15.03.2024")]
    pub visit_day: NaiveDate,
    pub visited: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = 1)]
    pub subject_id: i32,
    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "15.03.2024")]
    pub visit_day: NaiveDate,
    #[serde(default)]
    pub visited: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    pub student_id: Option<i32>,
    pub subject_id: Option<i32>,
    #[serde(default, deserialize_with = "dotted_date::option::deserialize")]
    #[schema(value_type = Option<String>, example = "15.03.2024")]
    pub visit_day: Option<NaiveDate>,
    pub visited: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQueryParams {
    pub student_id: Option<i32>,
    pub subject_id: Option<i32>,
    /// Subject name, matched case-insensitively
    pub subject_name: Option<String>,
}

/// AND-combined attendance filter; None means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub student_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub subject_name: Option<String>,
}

impl From<AttendanceQueryParams> for AttendanceFilter {
    fn from(params: AttendanceQueryParams) -> Self {
        Self {
            student_id: params.student_id,
            subject_id: params.subject_id,
            subject_name: normalize_string(params.subject_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_day_round_trip() {
        let body = serde_json::json!({
            "student_id": 1,
            "subject_id": 2,
            "visit_day": "15.03.2024",
            "visited": true
        });
        let input: CreateAttendance = serde_json::from_value(body).unwrap();
        assert_eq!(input.visit_day, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let stored = Attendance {
            id: 9,
            student_id: input.student_id,
            subject_id: input.subject_id,
            visit_day: input.visit_day,
            visited: input.visited,
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["visit_day"], "15.03.2024");
    }

    #[test]
    fn test_visited_defaults_to_false() {
        let body = serde_json::json!({
            "student_id": 1,
            "subject_id": 2,
            "visit_day": "01.09.2023"
        });
        let input: CreateAttendance = serde_json::from_value(body).unwrap();
        assert!(!input.visited);
    }

    #[test]
    fn test_iso_visit_day_rejected() {
        let body = serde_json::json!({
            "student_id": 1,
            "subject_id": 2,
            "visit_day": "2024-03-15"
        });
        assert!(serde_json::from_value::<CreateAttendance>(body).is_err());
    }

    #[test]
    fn test_blank_subject_name_is_no_filter() {
        let filter = AttendanceFilter::from(AttendanceQueryParams {
            subject_name: Some(" ".to_string()),
            ..Default::default()
        });
        assert_eq!(filter, AttendanceFilter::default());
    }
}
