//! # Application Layer
//!
//! Workflows over the domain:
//! - `IntakePipeline`: validate → analyze → persist one submission
//! - `AnalysisClient`: generation call with a fixed fallback
//! - `DashboardService`: table snapshots and resolution marking
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer → Domain Layer (entities, services, repositories)
//! Infrastructure → Domain Layer (implements ReviewStore)
//! ```

pub mod dtos;
pub mod errors;
pub mod services;
pub mod use_cases;

pub use dtos::{DashboardSnapshot, ResolveOutcome, SubmissionReceipt};
pub use errors::ApplicationError;
pub use services::{AnalysisClient, AnalysisFailure, DashboardService};
pub use use_cases::{Clock, IntakePipeline, SystemClock};

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;
