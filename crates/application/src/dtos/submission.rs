use domain::{Review, StorageError};

/// Result of one intake submission
///
/// The reply is always present. `storage_error` is set when the analyzed row
/// could not be persisted.
#[derive(Debug)]
pub struct SubmissionReceipt {
    pub reply: String,
    pub review: Review,
    pub storage_error: Option<StorageError>,
}

impl SubmissionReceipt {
    pub fn accepted(&self) -> bool {
        self.storage_error.is_none()
    }
}
