use std::cmp::Ordering;

use crate::gpa::models::{StudentGpa, StudentTotals};

/// Σ(mark × weight) / Σ(weight), or 0.0 when nothing carries weight
pub fn weighted_average(weighted_sum: i64, total_weight: i64) -> f64 {
    if total_weight == 0 {
        return 0.0;
    }
    weighted_sum as f64 / total_weight as f64
}

/// GPA per student, best first; equal GPAs fall back to student id ascending
pub fn rank(totals: Vec<StudentTotals>) -> Vec<StudentGpa> {
    let mut ranked: Vec<StudentGpa> = totals
        .into_iter()
        .map(|row| StudentGpa {
            student_id: row.student_id,
            gpa: weighted_average(row.totals.weighted_sum, row.totals.total_weight),
        })
        .collect();

    ranked.sort_by(|a, b| match b.gpa.total_cmp(&a.gpa) {
        Ordering::Equal => a.student_id.cmp(&b.student_id),
        other => other,
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::models::WeightedTotals;
    use proptest::prelude::*;

    fn row(student_id: i32, weighted_sum: i64, total_weight: i64) -> StudentTotals {
        StudentTotals {
            student_id,
            totals: WeightedTotals {
                weighted_sum,
                total_weight,
            },
        }
    }

    #[test]
    fn test_two_weighted_assignments() {
        // marks 80 and 90 at weights 2 and 3
        let weighted_sum = 80 * 2 + 90 * 3;
        assert_eq!(weighted_average(weighted_sum, 5), 86.0);
    }

    #[test]
    fn test_zero_weight_is_zero() {
        assert_eq!(weighted_average(0, 0), 0.0);
        assert_eq!(weighted_average(0, 0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_rank_orders_by_gpa_descending() {
        let ranked = rank(vec![row(1, 140, 2), row(2, 180, 2), row(3, 160, 2)]);
        let ids: Vec<i32> = ranked.iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(ranked[0].gpa, 90.0);
    }

    #[test]
    fn test_rank_ties_by_student_id() {
        let ranked = rank(vec![row(9, 100, 1), row(4, 200, 2), row(7, 300, 3)]);
        let ids: Vec<i32> = ranked.iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn test_zero_weight_student_ranks_last() {
        let ranked = rank(vec![row(1, 0, 0), row(2, 50, 1)]);
        assert_eq!(ranked[0].student_id, 2);
        assert_eq!(ranked[1].gpa, 0.0);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    fn grades() -> impl Strategy<Value = Vec<(i64, i64)>> {
        // (mark, weight)
        prop::collection::vec((0i64..=100, 0i64..=10), 0..20)
    }

    proptest! {
        #[test]
        fn prop_gpa_within_mark_bounds(pairs in grades()) {
            let weighted_sum: i64 = pairs.iter().map(|(m, w)| m * w).sum();
            let total_weight: i64 = pairs.iter().map(|(_, w)| w).sum();
            let gpa = weighted_average(weighted_sum, total_weight);

            prop_assert!(gpa.is_finite());
            if total_weight == 0 {
                prop_assert_eq!(gpa, 0.0);
            } else {
                let weighted: Vec<i64> =
                    pairs.iter().filter(|(_, w)| *w > 0).map(|(m, _)| *m).collect();
                let lo = *weighted.iter().min().unwrap() as f64;
                let hi = *weighted.iter().max().unwrap() as f64;
                prop_assert!(gpa >= lo - 1e-9 && gpa <= hi + 1e-9);
            }
        }

        #[test]
        fn prop_ranking_is_sorted(
            rows in prop::collection::vec((1i32..500, 0i64..10_000, 0i64..100), 0..30)
        ) {
            let input: Vec<StudentTotals> =
                rows.iter().map(|&(id, sum, weight)| row(id, sum, weight)).collect();
            let ranked = rank(input.clone());

            prop_assert_eq!(ranked.len(), input.len());
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.gpa > b.gpa || (a.gpa == b.gpa && a.student_id <= b.student_id)
                );
            }
        }
    }
}
