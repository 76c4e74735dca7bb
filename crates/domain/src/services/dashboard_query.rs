//! DashboardQuery - read-side derivations over the loaded review table
//!
//! Pure functions of the row sequence; nothing here touches storage.
//! Resolution marking lives in the application layer because it writes.

use crate::entities::{Review, ReviewId};
use crate::services::SessionDismissals;
use crate::value_objects::RatingPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ratings at or below this value are surfaced as issues
pub const LOW_RATING_THRESHOLD: f64 = 3.0;

/// Sentinel for `latest_summary` on an empty table
pub const NO_SUMMARY: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub count: usize,
    /// Mean of all numeric ratings; `None` when there are none
    pub average_rating: Option<f64>,
    pub latest_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `None` when no row of that date carries a usable rating
    pub average_rating: Option<f64>,
}

/// Row counts per star, plus rows whose rating is not a whole 1-5 value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub stars: [usize; 5],
    pub other: usize,
}

impl RatingDistribution {
    pub fn count_for(&self, stars: u8) -> usize {
        match stars {
            1..=5 => self.stars[(stars - 1) as usize],
            _ => 0,
        }
    }
}

/// A row paired with its identity in the loaded table
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    pub id: ReviewId,
    pub review: Review,
}

pub struct DashboardQuery<'a> {
    reviews: &'a [Review],
    policy: RatingPolicy,
}

impl<'a> DashboardQuery<'a> {
    pub fn new(reviews: &'a [Review]) -> Self {
        Self {
            reviews,
            policy: RatingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RatingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn metrics(&self) -> DashboardMetrics {
        let latest_summary = self
            .reviews
            .last()
            .map(|review| review.summary.clone())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        DashboardMetrics {
            count: self.reviews.len(),
            average_rating: mean(self.reviews.iter().filter_map(|r| self.rating_of(r))),
            latest_summary,
        }
    }

    /// Unresolved low-rated rows, newest first; ties keep insertion order
    pub fn open_issues(&self) -> Vec<ReviewEntry> {
        let mut issues: Vec<ReviewEntry> = self
            .entries()
            .filter(|entry| is_open_issue(&entry.review))
            .collect();
        sort_newest_first(&mut issues);
        issues
    }

    /// Open issues minus the ones dismissed in the current session
    pub fn open_issues_for_session(&self, dismissals: &SessionDismissals) -> Vec<ReviewEntry> {
        self.open_issues()
            .into_iter()
            .filter(|entry| !dismissals.contains(&entry.id))
            .collect()
    }

    /// Mean rating per calendar date, oldest date first
    pub fn daily_trend(&self) -> Vec<TrendPoint> {
        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for review in self.reviews {
            let Some(date) = review.date() else {
                continue;
            };
            let bucket = by_date.entry(date).or_default();
            if let Some(rating) = self.rating_of(review) {
                bucket.push(rating);
            }
        }

        by_date
            .into_iter()
            .map(|(date, ratings)| TrendPoint {
                date,
                average_rating: mean(ratings.into_iter()),
            })
            .collect()
    }

    pub fn rating_distribution(&self) -> RatingDistribution {
        let mut distribution = RatingDistribution::default();
        for review in self.reviews {
            match review.numeric_rating() {
                Some(value) if value.fract() == 0.0 && (1.0..=5.0).contains(&value) => {
                    distribution.stars[value as usize - 1] += 1;
                }
                _ => distribution.other += 1,
            }
        }
        distribution
    }

    /// Every row, newest first
    pub fn recent_feed(&self) -> Vec<ReviewEntry> {
        let mut feed: Vec<ReviewEntry> = self.entries().collect();
        sort_newest_first(&mut feed);
        feed
    }

    pub fn find(&self, id: &ReviewId) -> Option<&'a Review> {
        self.reviews
            .get(id.position())
            .filter(|review| &review.timestamp == id.timestamp())
    }

    fn entries(&self) -> impl Iterator<Item = ReviewEntry> + 'a {
        let reviews: &'a [Review] = self.reviews;
        reviews
            .iter()
            .enumerate()
            .map(|(position, review)| ReviewEntry {
                id: review.id_at(position),
                review: review.clone(),
            })
    }

    fn rating_of(&self, review: &Review) -> Option<f64> {
        review
            .numeric_rating()
            .and_then(|value| self.policy.apply(value))
    }
}

pub fn is_open_issue(review: &Review) -> bool {
    let low = review
        .numeric_rating()
        .map(|value| value <= LOW_RATING_THRESHOLD)
        .unwrap_or(false);
    low && !review.is_resolved()
}

fn sort_newest_first(entries: &mut [ReviewEntry]) {
    // Unparseable timestamps sort after every dated row.
    entries.sort_by(|a, b| b.review.submitted_at().cmp(&a.review.submitted_at()));
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
