//! SessionDismissals - issues hidden for the lifetime of one operator session
//!
//! Never persisted and never consulted when deciding `resolved`.

use crate::entities::ReviewId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SessionDismissals {
    dismissed: HashSet<ReviewId>,
}

impl SessionDismissals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already dismissed
    pub fn dismiss(&mut self, id: ReviewId) -> bool {
        self.dismissed.insert(id)
    }

    pub fn contains(&self, id: &ReviewId) -> bool {
        self.dismissed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.dismissed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dismissed.is_empty()
    }

    pub fn clear(&mut self) {
        self.dismissed.clear();
    }
}
