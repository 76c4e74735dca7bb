//! Whole-table persistence for the review table
//!
//! Backends only know how to read the full table and overwrite it. Row-level
//! semantics (append, update by id) live in [`TableReviewStore`] and are
//! always a read-modify-write cycle, so concurrent writers race and the last
//! write wins.

pub mod csv_backend;
pub mod csv_codec;
pub mod memory_backend;
pub mod review_store;
pub mod sqlite_backend;

use crate::config::{StorageBackendKind, StorageSettings};
use async_trait::async_trait;
use domain::{Review, ReviewStore, ReviewTimestamp, StorageResult, StoredRating};
use std::sync::Arc;

pub use csv_backend::CsvTableBackend;
pub use memory_backend::MemoryTableBackend;
pub use review_store::TableReviewStore;
pub use sqlite_backend::SqliteTableBackend;

/// Column order of the table, shared by every backend and the export
pub const COLUMNS: [&str; 6] = [
    "timestamp",
    "rating",
    "review",
    "user_response",
    "summary",
    "action",
];

/// One row exactly as stored
///
/// `extra` holds the cells of columns the pipeline does not know about, in
/// the order those columns appear in the table header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRecord {
    pub timestamp: String,
    pub rating: String,
    pub review: String,
    pub user_response: String,
    pub summary: String,
    pub action: String,
    pub extra: Vec<String>,
}

impl ReviewRecord {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.timestamp.as_str(),
            self.rating.as_str(),
            self.review.as_str(),
            self.user_response.as_str(),
            self.summary.as_str(),
            self.action.as_str(),
        ]
    }
}

/// Whole table: header in stored order plus rows
///
/// The header always contains the six known columns; any other column is
/// carried through a rewrite untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<ReviewRecord>,
}

impl Default for ReviewTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ReviewTable {
    /// Table with the standard header
    pub fn new(rows: Vec<ReviewRecord>) -> Self {
        Self {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Header names outside the six known columns, in header order
    pub fn extra_columns(&self) -> Vec<&str> {
        let mut seen = [false; 6];
        self.columns
            .iter()
            .filter(|column| match COLUMNS.iter().position(|known| *known == column.as_str()) {
                Some(i) if !seen[i] => {
                    seen[i] = true;
                    false
                }
                _ => true,
            })
            .map(String::as_str)
            .collect()
    }

    /// Cells of `row` in header order; missing extra cells are blank
    pub fn ordered_cells<'a>(&self, row: &'a ReviewRecord) -> Vec<&'a str> {
        let known = row.cells();
        let mut seen = [false; 6];
        let mut extras = row.extra.iter();
        self.columns
            .iter()
            .map(|column| match COLUMNS.iter().position(|c| *c == column.as_str()) {
                Some(i) if !seen[i] => {
                    seen[i] = true;
                    known[i]
                }
                _ => extras.next().map(String::as_str).unwrap_or(""),
            })
            .collect()
    }
}

impl From<&Review> for ReviewRecord {
    fn from(review: &Review) -> Self {
        Self {
            timestamp: review.timestamp.as_str().to_string(),
            rating: review.rating.as_str().to_string(),
            review: review.review.clone(),
            user_response: review.user_response.clone(),
            summary: review.summary.clone(),
            action: review.action.clone(),
            extra: Vec::new(),
        }
    }
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        Review {
            timestamp: ReviewTimestamp::from_raw(record.timestamp),
            rating: StoredRating::from_raw(record.rating),
            review: record.review,
            user_response: record.user_response,
            summary: record.summary,
            action: record.action,
        }
    }
}

/// Full-table read and full-table overwrite
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Human-readable location for logs
    fn describe(&self) -> String;

    /// Header and every row in stored order; empty when the table does not exist yet
    async fn read_table(&self) -> StorageResult<ReviewTable>;

    /// Replace the whole table with `table`
    async fn write_table(&self, table: &ReviewTable) -> StorageResult<()>;
}

/// Build the configured store
pub async fn open_review_store(settings: &StorageSettings) -> StorageResult<Arc<dyn ReviewStore>> {
    let path = settings.resolved_path();
    let store: Arc<dyn ReviewStore> = match settings.backend {
        StorageBackendKind::Csv => Arc::new(TableReviewStore::new(CsvTableBackend::new(path))),
        StorageBackendKind::Sqlite => Arc::new(TableReviewStore::new(
            SqliteTableBackend::open(path).await?,
        )),
    };
    Ok(store)
}
