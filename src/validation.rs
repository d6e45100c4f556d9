// Validation utilities module
// Custom rules used by the validator derives on request bodies

use chrono::NaiveTime;
use validator::ValidationError;

/// Rejects strings that are empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("must_not_be_blank"))
    } else {
        Ok(())
    }
}

/// A class slot must end strictly after it starts
pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::new("end_time_must_follow_start_time"))
    }
}
