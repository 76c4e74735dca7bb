use super::{ReviewRecord, TableBackend};
use async_trait::async_trait;
use common::OperationTimer;
use domain::{Review, ReviewId, ReviewStore, StorageError, StorageResult};
use tracing::{debug, info, warn};

/// `ReviewStore` over any whole-table backend
///
/// Each mutation loads the full table, changes it in memory and writes it all
/// back. Nothing is locked between the read and the write.
pub struct TableReviewStore<B: TableBackend> {
    backend: B,
}

impl<B: TableBackend> TableReviewStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: TableBackend> ReviewStore for TableReviewStore<B> {
    async fn load_all(&self) -> StorageResult<Vec<Review>> {
        let table = self.backend.read_table().await.map_err(|e| {
            warn!(store = %self.backend.describe(), error = %e, "Failed to load review table");
            e
        })?;
        debug!(store = %self.backend.describe(), rows = table.rows.len(), "Loaded review table");
        Ok(table.rows.into_iter().map(Review::from).collect())
    }

    async fn append(&self, review: Review) -> StorageResult<()> {
        let mut timer = OperationTimer::new("review_store.append");
        timer.add_field("store", self.backend.describe());

        let result = async {
            let mut table = self.backend.read_table().await?;
            table.rows.push(ReviewRecord::from(&review));
            self.backend.write_table(&table).await?;
            Ok::<usize, StorageError>(table.rows.len())
        }
        .await;

        timer.finish_with_result(&result);
        let rows = result?;
        info!(timestamp = %review.timestamp, rows, "Review appended");
        Ok(())
    }

    async fn update_action(&self, id: &ReviewId, new_action: &str) -> StorageResult<()> {
        let mut timer = OperationTimer::new("review_store.update_action");
        timer.add_field("review_id", id.to_string());

        let result = async {
            let mut table = self.backend.read_table().await?;
            let record = table
                .rows
                .get_mut(id.position())
                .filter(|record| record.timestamp == id.timestamp().as_str())
                .ok_or_else(|| StorageError::RowNotFound(id.to_string()))?;
            record.action = new_action.to_string();
            self.backend.write_table(&table).await
        }
        .await;

        timer.finish_with_result(&result);
        result?;
        info!(review_id = %id, "Review action updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryTableBackend, ReviewTable};
    use chrono::NaiveDate;
    use domain::{AnalysisResult, Rating, ReviewTimestamp};

    fn submission(day: u32, stars: i64, action: &str) -> Review {
        let at = NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid date");
        Review::from_submission(
            at,
            Rating::new(stars).expect("valid rating"),
            format!("review {day}"),
            AnalysisResult::new("Thanks", "summary", action),
        )
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = TableReviewStore::new(MemoryTableBackend::new());
        store.append(submission(2, 4, "none")).await.expect("append");
        store.append(submission(1, 2, "call")).await.expect("append");

        let rows = store.load_all().await.expect("load");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].review, "review 2");
        assert_eq!(rows[1].review, "review 1");
        assert_eq!(rows[1].rating.as_str(), "2");
    }

    #[tokio::test]
    async fn test_update_action_targets_one_row() {
        let store = TableReviewStore::new(MemoryTableBackend::new());
        store.append(submission(1, 2, "call")).await.expect("append");
        store.append(submission(2, 1, "refund")).await.expect("append");

        let rows = store.load_all().await.expect("load");
        let id = rows[1].id_at(1);
        store
            .update_action(&id, "refund (RESOLVED)")
            .await
            .expect("update");

        let rows = store.load_all().await.expect("load");
        assert_eq!(rows[0].action, "call");
        assert_eq!(rows[1].action, "refund (RESOLVED)");
    }

    #[tokio::test]
    async fn test_update_with_stale_id_is_row_not_found() {
        let store = TableReviewStore::new(MemoryTableBackend::new());
        store.append(submission(1, 2, "call")).await.expect("append");

        let stale = ReviewId::new(0, ReviewTimestamp::from_raw("2023-01-01 00:00:00"));
        let missing = ReviewId::new(7, ReviewTimestamp::from_raw("2024-06-01 09:30:00"));

        assert!(matches!(
            store.update_action(&stale, "x").await,
            Err(StorageError::RowNotFound(_))
        ));
        assert!(matches!(
            store.update_action(&missing, "x").await,
            Err(StorageError::RowNotFound(_))
        ));
        assert_eq!(store.load_all().await.expect("load")[0].action, "call");
    }

    #[tokio::test]
    async fn test_mutations_keep_unknown_columns() {
        let mut seeded = ReviewTable::new(vec![ReviewRecord {
            timestamp: "2024-06-01 09:30:00".to_string(),
            rating: "2".to_string(),
            review: "slow".to_string(),
            user_response: "Sorry".to_string(),
            summary: "slow".to_string(),
            action: "speed up".to_string(),
            extra: vec!["KEEP-ME".to_string()],
        }]);
        seeded.columns.push("notes".to_string());
        let backend = MemoryTableBackend::with_table(seeded);
        let store = TableReviewStore::new(backend.clone());

        store.append(submission(2, 5, "none")).await.expect("append");
        let id = ReviewId::new(0, ReviewTimestamp::from_raw("2024-06-01 09:30:00"));
        store
            .update_action(&id, "speed up (RESOLVED)")
            .await
            .expect("update");

        let table = backend.snapshot().await;
        assert_eq!(table.extra_columns(), vec!["notes"]);
        assert_eq!(table.rows[0].extra, vec!["KEEP-ME".to_string()]);
        assert_eq!(table.rows[0].action, "speed up (RESOLVED)");
        assert!(table.rows[1].extra.is_empty());
    }
}
