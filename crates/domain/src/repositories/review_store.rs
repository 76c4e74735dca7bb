//! ReviewStore - Domain abstraction for the shared review table
//!
//! Implementations work against a whole-table backend: every mutation is a
//! read-modify-write of the full table, so concurrent writers race and the
//! last write wins.

use crate::entities::{Review, ReviewId};
use crate::errors::StorageResult;
use async_trait::async_trait;

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// All rows in insertion order; empty when the store does not exist yet
    async fn load_all(&self) -> StorageResult<Vec<Review>>;

    /// Append one row at the end of the table
    async fn append(&self, review: Review) -> StorageResult<()>;

    /// Replace the action text of the row identified by `id`
    async fn update_action(&self, id: &ReviewId, new_action: &str) -> StorageResult<()>;
}
