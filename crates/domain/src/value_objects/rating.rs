//! Rating - star rating value objects
//!
//! `Rating` is what a submitter may send (1-5 stars). `StoredRating` is what
//! a table cell holds after external edits, kept verbatim so that a full-table
//! rewrite never coerces it.

use crate::errors::{DomainError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// Validated star rating supplied at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < MIN_STARS as i64 || value > MAX_STARS as i64 {
            return Err(ValidationError::RatingOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating cell as persisted in the review table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRating(String);

impl StoredRating {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric view of the cell; `None` when it does not parse as a finite number
    pub fn numeric(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

impl From<Rating> for StoredRating {
    fn from(rating: Rating) -> Self {
        Self(rating.to_string())
    }
}

impl fmt::Display for StoredRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How metric and trend math treats stored ratings outside 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingPolicy {
    /// Use the stored number as-is
    #[default]
    PassThrough,
    /// Clamp into 1-5 before averaging
    Clamp,
    /// Treat out-of-range values as missing
    Reject,
}

impl RatingPolicy {
    pub fn apply(&self, value: f64) -> Option<f64> {
        let (min, max) = (MIN_STARS as f64, MAX_STARS as f64);
        match self {
            RatingPolicy::PassThrough => Some(value),
            RatingPolicy::Clamp => Some(value.clamp(min, max)),
            RatingPolicy::Reject => (min..=max).contains(&value).then_some(value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RatingPolicy::PassThrough => "pass_through",
            RatingPolicy::Clamp => "clamp",
            RatingPolicy::Reject => "reject",
        }
    }
}

impl FromStr for RatingPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass_through" | "passthrough" | "pass-through" => Ok(RatingPolicy::PassThrough),
            "clamp" => Ok(RatingPolicy::Clamp),
            "reject" => Ok(RatingPolicy::Reject),
            other => Err(DomainError::UnknownRatingPolicy(other.to_string())),
        }
    }
}
