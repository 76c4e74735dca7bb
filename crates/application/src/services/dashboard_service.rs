//! DashboardService - operator reads and resolution marking

use crate::dtos::{DashboardSnapshot, ResolveOutcome};
use crate::ApplicationResult;
use common::OperationTimer;
use domain::errors::StorageError;
use domain::value_objects::with_resolution_marker;
use domain::{DashboardQuery, RatingPolicy, ReviewId, ReviewStore};
use std::sync::Arc;
use tracing::{debug, info};

pub struct DashboardService {
    store: Arc<dyn ReviewStore>,
    policy: RatingPolicy,
}

impl DashboardService {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            store,
            policy: RatingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RatingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fresh read of the whole table; read failures are returned, never partial
    pub async fn load(&self) -> ApplicationResult<DashboardSnapshot> {
        let reviews = self.store.load_all().await?;
        debug!(rows = reviews.len(), policy = self.policy.name(), "Dashboard loaded");
        Ok(DashboardSnapshot::new(reviews, self.policy))
    }

    /// Append the resolution marker to the row's action
    ///
    /// Reloads the table first so the marker is checked against the current
    /// action text. A second call on the same row writes nothing.
    pub async fn mark_resolved(&self, id: &ReviewId) -> ApplicationResult<ResolveOutcome> {
        let mut timer = OperationTimer::new("dashboard.mark_resolved");
        timer.add_field("review_id", id.to_string());

        let reviews = self.store.load_all().await?;
        let review = DashboardQuery::new(&reviews)
            .find(id)
            .ok_or_else(|| StorageError::RowNotFound(id.to_string()))?;

        if review.is_resolved() {
            debug!(review_id = %id, "Review already resolved");
            timer.finish();
            return Ok(ResolveOutcome::AlreadyResolved);
        }

        let action = with_resolution_marker(&review.action);
        self.store.update_action(id, &action).await?;

        info!(review_id = %id, action = %action, "Review marked resolved");
        timer.finish();
        Ok(ResolveOutcome::Resolved { action })
    }
}
