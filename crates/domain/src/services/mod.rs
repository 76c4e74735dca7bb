//! Domain Services - business logic that spans several entities

pub mod dashboard_query;
pub mod session_dismissals;

pub use dashboard_query::{
    is_open_issue, DashboardMetrics, DashboardQuery, RatingDistribution, ReviewEntry,
    TrendPoint, LOW_RATING_THRESHOLD, NO_SUMMARY,
};
pub use session_dismissals::SessionDismissals;
