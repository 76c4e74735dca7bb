//! Application Layer Errors
//!
//! Analysis never produces an error (it falls back), so everything here comes
//! from input validation or the review store.

use domain::errors::{StorageError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input rejected before any backend call
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Review store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApplicationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ApplicationError::Validation(_))
    }

    /// Category for logs and exit messages
    pub fn category(&self) -> &'static str {
        match self {
            ApplicationError::Validation(_) => "validation",
            ApplicationError::Storage(StorageError::RowNotFound(_)) => "not_found",
            ApplicationError::Storage(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let validation: ApplicationError = ValidationError::EmptyReview.into();
        assert!(validation.is_validation());
        assert_eq!(validation.category(), "validation");

        let missing: ApplicationError = StorageError::RowNotFound("x_1".to_string()).into();
        assert_eq!(missing.category(), "not_found");

        let malformed: ApplicationError = StorageError::Malformed("bad".to_string()).into();
        assert_eq!(malformed.category(), "storage");
        assert!(malformed.to_string().starts_with("Storage error"));
    }
}
