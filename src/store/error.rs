//! Store error types
//!
//! All store errors are local and recoverable by the caller; nothing here
//! is fatal to the hosting process.

use thiserror::Error;

/// Round state store operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No association exists for the requested (company, student) pair
    #[error("no participation record for student {student_id} at company {company_id}")]
    NotFound {
        /// Company identifier of the missing pair
        company_id: String,
        /// Student identifier of the missing pair
        student_id: String,
    },

    /// Company not registered
    #[error("company not found: {0}")]
    CompanyNotFound(String),

    /// Student not registered
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// Round index outside `[0, total_rounds)`
    #[error("round index {round_index} outside [0, {total_rounds}) for company {company_id}")]
    InvalidIndex {
        /// Company whose pipeline bounds the index
        company_id: String,
        /// Offending 0-based round index
        round_index: u32,
        /// Pipeline length of the company
        total_rounds: u32,
    },

    /// Invalid input parameters (blank name, zero-round pipeline, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StoreError {
    /// Stable error code for client-side handling
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            StoreError::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            StoreError::InvalidIndex { .. } => "INVALID_INDEX",
            StoreError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidIndex {
            company_id: "c1".to_string(),
            round_index: 5,
            total_rounds: 3,
        };
        assert_eq!(
            err.to_string(),
            "round index 5 outside [0, 3) for company c1"
        );
        assert_eq!(err.code(), "INVALID_INDEX");
    }
}
