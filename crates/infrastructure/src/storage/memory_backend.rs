use super::{ReviewRecord, ReviewTable, TableBackend};
use async_trait::async_trait;
use domain::StorageResult;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local table, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryTableBackend {
    table: Arc<RwLock<ReviewTable>>,
}

impl MemoryTableBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ReviewRecord>) -> Self {
        Self::with_table(ReviewTable::new(rows))
    }

    pub fn with_table(table: ReviewTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    pub async fn snapshot(&self) -> ReviewTable {
        self.table.read().await.clone()
    }
}

#[async_trait]
impl TableBackend for MemoryTableBackend {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn read_table(&self) -> StorageResult<ReviewTable> {
        Ok(self.table.read().await.clone())
    }

    async fn write_table(&self, table: &ReviewTable) -> StorageResult<()> {
        *self.table.write().await = table.clone();
        Ok(())
    }
}
