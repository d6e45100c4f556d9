// Assignments and grades

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::formats::dotted_date;
use crate::query::normalize_string;

/// A graded piece of work; `weight` scales its marks in the GPA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Midterm")]
    pub name: String,
    #[schema(example = 1)]
    pub subject_id: i32,
    #[schema(example = "Linear Algebra")]
    pub subject_name: String,
    #[schema(example = 3)]
    pub weight: i32,
    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "20.10.2024")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    #[validate(custom = "crate::validation::validate_not_blank", length(max = 255))]
    #[schema(example = "Midterm")]
    pub name: String,

    #[schema(example = 1)]
    pub subject_id: i32,

    #[validate(range(min = 0, message = "Weight must not be negative"))]
    #[schema(example = 3)]
    pub weight: i32,

    #[serde(with = "dotted_date")]
    #[schema(value_type = String, example = "20.10.2024")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGrade {
    #[schema(example = 1)]
    pub student_id: i32,

    #[schema(example = 1)]
    pub assignment_id: i32,

    #[validate(range(min = 0, message = "Mark must not be negative"))]
    #[schema(example = 87)]
    pub mark: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignmentQueryParams {
    pub subject_id: Option<i32>,
    /// Subject name, matched case-insensitively
    pub subject_name: Option<String>,
}

impl AssignmentQueryParams {
    pub fn subject_name(&self) -> Option<String> {
        normalize_string(self.subject_name.clone()).map(|name| name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_weight_rejected() {
        let assignment = CreateAssignment {
            name: "Quiz".to_string(),
            subject_id: 1,
            weight: -1,
            date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
        };
        let errors = assignment.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weight"));
    }

    #[test]
    fn test_zero_weight_allowed() {
        let assignment = CreateAssignment {
            name: "Practice".to_string(),
            subject_id: 1,
            weight: 0,
            date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
        };
        assert!(assignment.validate().is_ok());
    }

    #[test]
    fn test_negative_mark_rejected() {
        let grade = CreateGrade {
            student_id: 1,
            assignment_id: 1,
            mark: -5,
        };
        assert!(grade.validate().is_err());
    }

    #[test]
    fn test_assignment_date_format() {
        let body = serde_json::json!({
            "name": "Essay",
            "subject_id": 2,
            "weight": 2,
            "date": "05.11.2024"
        });
        let assignment: CreateAssignment = serde_json::from_value(body).unwrap();
        assert_eq!(assignment.date, NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
    }

    #[test]
    fn test_subject_name_param_is_lowercased() {
        let params = AssignmentQueryParams {
            subject_id: None,
            subject_name: Some(" Physics ".to_string()),
        };
        assert_eq!(params.subject_name(), Some("physics".to_string()));
    }
}
