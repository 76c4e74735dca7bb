//! CSV download of the full review table

use crate::storage::csv_codec::encode_table;
use crate::storage::{ReviewRecord, ReviewTable};
use domain::{Review, StorageResult};
use std::path::Path;
use tracing::info;

/// Default file name offered for the download
pub const DEFAULT_EXPORT_FILE: &str = "customer_feedback.csv";

/// Encode the rows as UTF-8 CSV with a header, cells unchanged
pub fn export_csv(reviews: &[Review]) -> StorageResult<Vec<u8>> {
    let records: Vec<ReviewRecord> = reviews.iter().map(ReviewRecord::from).collect();
    encode_table(&ReviewTable::new(records))
}

/// Write the export to `path`, returning the number of rows written
pub async fn export_csv_to_file(reviews: &[Review], path: &Path) -> StorageResult<usize> {
    let bytes = export_csv(reviews)?;
    tokio::fs::write(path, bytes).await?;
    info!(path = %path.display(), rows = reviews.len(), "Exported review table");
    Ok(reviews.len())
}
