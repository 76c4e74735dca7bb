//! Domain Errors - business rule violations and storage failures
//!
//! Validation errors are raised before any backend is touched.
//! Storage errors are "fail loud": every store operation surfaces them
//! to the caller instead of swallowing them.

use thiserror::Error;

/// Input rejected before the pipeline calls any backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Business validation: review text cannot be empty or whitespace-only
    #[error("Review text cannot be empty")]
    EmptyReview,

    /// Business validation: star rating must be between 1 and 5
    #[error("Rating out of range: got {0}, expected 1-5")]
    RatingOutOfRange(i64),

    /// Business validation: malformed review identifier
    #[error("Invalid review id: {0}")]
    InvalidReviewId(String),
}

/// Failures of the tabular backing store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend unreachable or the underlying file could not be read/written
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Existing data is not a well-formed review table
    #[error("Malformed review table: {0}")]
    Malformed(String),

    /// Backend-specific rejection (e.g. SQLite write failure)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Row addressed by an update no longer exists at that position
    #[error("Review not found: {0}")]
    RowNotFound(String),
}

/// Errors produced by domain value-object construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration value that does not map to a known policy
    #[error("Unknown rating policy: {0}")]
    UnknownRatingPolicy(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::EmptyReview.to_string(),
            "Review text cannot be empty"
        );
        assert_eq!(
            ValidationError::RatingOutOfRange(7).to_string(),
            "Rating out of range: got 7, expected 1-5"
        );
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
