//! ReviewId - row identity within the review table
//!
//! The table has no key column, so a row is addressed by its load-order
//! position paired with its timestamp. Rendered as `"<timestamp>_<position>"`.

use crate::errors::ValidationError;
use crate::value_objects::ReviewTimestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId {
    position: usize,
    timestamp: ReviewTimestamp,
}

impl ReviewId {
    pub fn new(position: usize, timestamp: ReviewTimestamp) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn timestamp(&self) -> &ReviewTimestamp {
        &self.timestamp
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.timestamp, self.position)
    }
}

impl FromStr for ReviewId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidReviewId(s.to_string());
        let (timestamp, position) = s.rsplit_once('_').ok_or_else(invalid)?;
        let position = position.parse::<usize>().map_err(|_| invalid())?;
        Ok(Self::new(position, ReviewTimestamp::from_raw(timestamp)))
    }
}
