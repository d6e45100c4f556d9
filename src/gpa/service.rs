use crate::error::ApiError;
use crate::gpa::calculator::{rank, weighted_average};
use crate::gpa::models::{GpaFilter, StudentGpa};
use crate::gpa::repository::GpaRepository;
use crate::students::StudentRepository;
use crate::subjects::SubjectRepository;

/// Service layer for GPA and rankings
#[derive(Clone)]
pub struct GpaService {
    repository: GpaRepository,
    students: StudentRepository,
    subjects: SubjectRepository,
}

impl GpaService {
    pub fn new(
        repository: GpaRepository,
        students: StudentRepository,
        subjects: SubjectRepository,
    ) -> Self {
        Self {
            repository,
            students,
            subjects,
        }
    }

    /// Weighted GPA of one student over the filtered grades
    ///
    /// Unknown student, or unknown subject when filtering by subject id,
    /// is a 404. A student without matching grades has GPA 0.0.
    pub async fn student_gpa(&self, student_id: i32, filter: &GpaFilter) -> Result<f64, ApiError> {
        if !self.students.exists(student_id).await? {
            return Err(ApiError::not_found("Student", student_id));
        }
        if let Some(subject_id) = filter.subject_id {
            if !self.subjects.exists(subject_id).await? {
                return Err(ApiError::not_found("Subject", subject_id));
            }
        }

        let totals = self.repository.student_totals(student_id, filter).await?;
        let gpa = weighted_average(totals.weighted_sum, totals.total_weight);

        tracing::debug!(
            "GPA for student {}: {} (weight {})",
            student_id,
            gpa,
            totals.total_weight
        );
        Ok(gpa)
    }

    /// Every student with matching grades, best GPA first
    pub async fn rankings(&self, filter: &GpaFilter) -> Result<Vec<StudentGpa>, ApiError> {
        let totals = self.repository.ranking_totals(filter).await?;
        Ok(rank(totals))
    }
}
