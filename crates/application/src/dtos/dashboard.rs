use domain::{DashboardQuery, RatingPolicy, Review};
use serde::Serialize;

/// One consistent read of the review table
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub reviews: Vec<Review>,
    pub policy: RatingPolicy,
}

impl DashboardSnapshot {
    pub fn new(reviews: Vec<Review>, policy: RatingPolicy) -> Self {
        Self { reviews, policy }
    }

    pub fn query(&self) -> DashboardQuery<'_> {
        DashboardQuery::new(&self.reviews).with_policy(self.policy)
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Marker appended; carries the new action text
    Resolved { action: String },
    /// Marker was already present, nothing written
    AlreadyResolved,
}
