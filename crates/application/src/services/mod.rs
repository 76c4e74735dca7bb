//! Application Services

pub mod analysis_client;
pub mod dashboard_service;

pub use analysis_client::{AnalysisClient, AnalysisFailure};
pub use dashboard_service::DashboardService;
