//! IntakePipeline - validate, analyze, persist
//!
//! Steps always run in that order. A storage failure does not hide the reply:
//! the caller gets both and decides how to show them.

use crate::dtos::SubmissionReceipt;
use crate::services::AnalysisClient;
use crate::ApplicationResult;
use chrono::{Local, NaiveDateTime};
use common::{OperationTimer, RequestContext};
use domain::errors::ValidationError;
use domain::{Rating, Review, ReviewStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Source of submission times
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, as shown to operators
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub struct IntakePipeline {
    analysis: AnalysisClient,
    store: Arc<dyn ReviewStore>,
    clock: Arc<dyn Clock>,
}

impl IntakePipeline {
    pub fn new(analysis: AnalysisClient, store: Arc<dyn ReviewStore>) -> Self {
        Self {
            analysis,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate input without touching any backend
    pub fn validate(rating: i64, review_text: &str) -> Result<Rating, ValidationError> {
        if review_text.trim().is_empty() {
            return Err(ValidationError::EmptyReview);
        }
        Rating::new(rating)
    }

    #[instrument(skip(self, review_text), fields(review_chars = review_text.chars().count()))]
    pub async fn submit(&self, rating: i64, review_text: &str) -> ApplicationResult<SubmissionReceipt> {
        let context = RequestContext::new();
        let rating = Self::validate(rating, review_text)?;

        let mut timer = OperationTimer::new("intake.submit");
        timer.add_field("request_id", &context.request_id);
        timer.add_field("rating", rating.value());

        let analysis = self.analysis.analyze(rating, review_text).await;
        let review = Review::from_submission(self.clock.now(), rating, review_text, analysis);
        let reply = review.user_response.clone();

        let storage_error = match self.store.append(review.clone()).await {
            Ok(()) => {
                info!(
                    request_id = %context.request_id,
                    timestamp = %review.timestamp,
                    "Feedback stored"
                );
                None
            }
            Err(e) => {
                warn!(
                    request_id = %context.request_id,
                    error = %e,
                    "Feedback analyzed but could not be stored"
                );
                Some(e)
            }
        };

        timer.add_field("stored", storage_error.is_none());
        timer.finish();

        Ok(SubmissionReceipt {
            reply,
            review,
            storage_error,
        })
    }
}
