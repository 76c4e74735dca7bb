use super::csv_codec::{decode_table, encode_table};
use super::{ReviewTable, TableBackend};
use async_trait::async_trait;
use domain::{StorageError, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Review table kept in a single CSV file
#[derive(Debug, Clone)]
pub struct CsvTableBackend {
    path: PathBuf,
}

impl CsvTableBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableBackend for CsvTableBackend {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    async fn read_table(&self) -> StorageResult<ReviewTable> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Review table does not exist yet");
                return Ok(ReviewTable::default());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };

        decode_table(&bytes)
    }

    async fn write_table(&self, table: &ReviewTable) -> StorageResult<()> {
        let bytes = encode_table(table)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), rows = table.rows.len(), "Review table written");
        Ok(())
    }
}
