//! Infrastructure Layer - configuration and table storage
//!
//! - `config`: `FeedbackConfig` loaded from TOML, `.env` and `FEEDBACK_*` variables
//! - `storage`: CSV and SQLite whole-table backends behind `TableReviewStore`
//! - `export`: CSV download of the full table

pub mod config;
pub mod export;
pub mod storage;

pub use config::{ConfigError, ConfigLoader, FeedbackConfig};
pub use export::{export_csv, export_csv_to_file, DEFAULT_EXPORT_FILE};
pub use storage::{
    open_review_store, CsvTableBackend, MemoryTableBackend, ReviewRecord, ReviewTable,
    SqliteTableBackend, TableBackend, TableReviewStore,
};
