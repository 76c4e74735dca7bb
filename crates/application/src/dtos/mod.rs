//! Data Transfer Objects returned to the presentation layer

pub mod dashboard;
pub mod submission;

pub use dashboard::{DashboardSnapshot, ResolveOutcome};
pub use submission::SubmissionReceipt;
