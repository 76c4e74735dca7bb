use super::{ReviewRecord, ReviewTable, TableBackend};
use async_trait::async_trait;
use domain::{StorageError, StorageResult};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// SQLite-backed review table
///
/// Cells are stored as text so that ratings keep their exact spelling. Writes
/// replace every row inside one transaction.
pub struct SqliteTableBackend {
    conn: Arc<Mutex<Connection>>,
    location: String,
}

impl SqliteTableBackend {
    pub async fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let conn = Connection::open(&path).map_err(backend_error)?;
        Self::with_connection(conn, path.display().to_string())
    }

    /// Private in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory().map_err(backend_error)?;
        Self::with_connection(conn, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, location: String) -> StorageResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                position INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL,
                rating TEXT NOT NULL,
                review TEXT NOT NULL,
                user_response TEXT NOT NULL,
                summary TEXT NOT NULL,
                action TEXT NOT NULL
            );
            "#,
        )
        .map_err(backend_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }
}

#[async_trait]
impl TableBackend for SqliteTableBackend {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.location)
    }

    async fn read_table(&self) -> StorageResult<ReviewTable> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(
                "SELECT timestamp, rating, review, user_response, summary, action
                 FROM reviews ORDER BY position",
            )
            .map_err(backend_error)?;

        let mut rows = stmt.query([]).map_err(backend_error)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(backend_error)? {
            let mut cells: [String; 6] = Default::default();
            for (i, cell) in cells.iter_mut().enumerate() {
                let value: Value = row.get(i).map_err(backend_error)?;
                *cell = cell_text(value, i)?;
            }
            let [timestamp, rating, review, user_response, summary, action] = cells;
            records.push(ReviewRecord {
                timestamp,
                rating,
                review,
                user_response,
                summary,
                action,
                extra: Vec::new(),
            });
        }

        Ok(ReviewTable::new(records))
    }

    async fn write_table(&self, table: &ReviewTable) -> StorageResult<()> {
        let extra = table.extra_columns();
        if !extra.is_empty() {
            return Err(StorageError::Backend(format!(
                "reviews table has no column for {}",
                extra.join(", ")
            )));
        }
        let rows = &table.rows;

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(backend_error)?;

        tx.execute("DELETE FROM reviews", []).map_err(backend_error)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO reviews (position, timestamp, rating, review, user_response, summary, action)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(backend_error)?;

            for (position, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    row.timestamp,
                    row.rating,
                    row.review,
                    row.user_response,
                    row.summary,
                    row.action,
                ])
                .map_err(backend_error)?;
            }
        }

        tx.commit().map_err(backend_error)?;
        debug!(location = %self.location, rows = rows.len(), "Review table written");
        Ok(())
    }
}

/// Text form of a cell; numbers written by other tools are accepted
fn cell_text(value: Value, column: usize) -> StorageResult<String> {
    match value {
        Value::Text(text) => Ok(text),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Real(f) => Ok(f.to_string()),
        Value::Null => Ok(String::new()),
        Value::Blob(_) => Err(StorageError::Malformed(format!(
            "binary data in column '{}'",
            super::COLUMNS[column]
        ))),
    }
}

fn backend_error(error: rusqlite::Error) -> StorageError {
    StorageError::Backend(error.to_string())
}
