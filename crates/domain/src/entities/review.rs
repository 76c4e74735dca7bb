//! Review - one row of the feedback table

use crate::entities::ReviewId;
use crate::value_objects::{
    is_resolved, AnalysisResult, Rating, ReviewTimestamp, StoredRating,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Persisted feedback entry
///
/// All six fields are always populated for rows created by intake. Rows
/// loaded from an externally edited table keep their cells verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub timestamp: ReviewTimestamp,
    pub rating: StoredRating,
    pub review: String,
    pub user_response: String,
    pub summary: String,
    pub action: String,
}

impl Review {
    /// Build the row for a fresh submission
    pub fn from_submission(
        at: NaiveDateTime,
        rating: Rating,
        review_text: impl Into<String>,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            timestamp: ReviewTimestamp::from_datetime(at),
            rating: rating.into(),
            review: review_text.into(),
            user_response: analysis.user_response,
            summary: analysis.summary,
            action: analysis.action,
        }
    }

    pub fn is_resolved(&self) -> bool {
        is_resolved(&self.action)
    }

    pub fn numeric_rating(&self) -> Option<f64> {
        self.rating.numeric()
    }

    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.to_datetime()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.date()
    }

    /// Identity of this row when it sits at `position` in load order
    pub fn id_at(&self, position: usize) -> ReviewId {
        ReviewId::new(position, self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_submission_populates_all_fields() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid datetime");
        let review = Review::from_submission(
            at,
            Rating::new(2).expect("valid rating"),
            "slow service",
            AnalysisResult::new("Sorry!", "slow service", "speed up"),
        );

        assert_eq!(review.timestamp.as_str(), "2024-05-01 09:30:00");
        assert_eq!(review.rating.as_str(), "2");
        assert_eq!(review.review, "slow service");
        assert_eq!(review.user_response, "Sorry!");
        assert_eq!(review.summary, "slow service");
        assert_eq!(review.action, "speed up");
        assert!(!review.is_resolved());
        assert_eq!(review.id_at(4).to_string(), "2024-05-01 09:30:00_4");
    }
}
