// GPA aggregation models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::query::normalize_string;

/// The two sums a GPA is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct WeightedTotals {
    /// Σ(mark × weight)
    pub weighted_sum: i64,
    /// Σ(weight)
    pub total_weight: i64,
}

/// One row of the grouped ranking aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct StudentTotals {
    pub student_id: i32,
    #[sqlx(flatten)]
    pub totals: WeightedTotals,
}

/// A ranking entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentGpa {
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = 86.0)]
    pub gpa: f64,
}

/// Body of the per-student GPA endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GpaResponse {
    #[schema(example = 1)]
    pub student_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i32>,
    #[schema(example = 86.0)]
    pub gpa: f64,
}

/// Restricts which grade × assignment pairs are aggregated
///
/// All fields optional and AND-combined; None means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpaFilter {
    pub group_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub subject_name: Option<String>,
}

impl GpaFilter {
    pub fn subject(subject_id: i32) -> Self {
        Self {
            subject_id: Some(subject_id),
            ..Self::default()
        }
    }
}

/// Query string for GET /rankings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingParams {
    /// Only students of this group
    pub group_id: Option<i32>,
    /// Only assignments of this subject
    pub subject_id: Option<i32>,
    /// Subject name, case-insensitive; `all` means every subject
    pub subject_name: Option<String>,
}

impl From<RankingParams> for GpaFilter {
    fn from(params: RankingParams) -> Self {
        let subject_name = normalize_string(params.subject_name)
            .filter(|name| !name.eq_ignore_ascii_case("all"));

        Self {
            group_id: params.group_id,
            subject_id: params.subject_id,
            subject_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(subject_name: Option<&str>) -> RankingParams {
        RankingParams {
            group_id: Some(2),
            subject_id: None,
            subject_name: subject_name.map(str::to_string),
        }
    }

    #[test]
    fn test_all_means_no_subject_filter() {
        for raw in ["all", "ALL", "All", " all "] {
            let filter = GpaFilter::from(params(Some(raw)));
            assert_eq!(filter.subject_name, None, "raw {:?}", raw);
            assert_eq!(filter.group_id, Some(2));
        }
    }

    #[test]
    fn test_named_subject_kept() {
        let filter = GpaFilter::from(params(Some("Physics")));
        assert_eq!(filter.subject_name.as_deref(), Some("Physics"));
    }

    #[test]
    fn test_empty_subject_is_no_filter() {
        assert_eq!(GpaFilter::from(params(Some(""))).subject_name, None);
        assert_eq!(GpaFilter::from(params(None)).subject_name, None);
    }

    #[test]
    fn test_student_gpa_omits_missing_subject() {
        let json = serde_json::to_value(GpaResponse {
            student_id: 3,
            subject_id: None,
            gpa: 0.0,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "student_id": 3, "gpa": 0.0 }));
    }
}
