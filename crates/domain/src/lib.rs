//! Domain Layer - feedback pipeline business logic
//!
//! Содержит ТОЛЬКО чистую business logic без dependencies на:
//! - Infrastructure (table files, databases, networks)
//! - Frameworks (CLI, UI)
//! - External systems (generation backends)
//!
//! - Entities: `Review`, `ReviewId`
//! - Value Objects: `Rating`, `StoredRating`, `AnalysisResult`, resolution marker
//! - Repository Abstractions: `ReviewStore`
//! - Services: `DashboardQuery`, `SessionDismissals`

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{Review, ReviewId};
pub use errors::{DomainError, DomainResult, StorageError, StorageResult, ValidationError};
pub use repositories::ReviewStore;
pub use services::{
    DashboardMetrics, DashboardQuery, RatingDistribution, ReviewEntry, SessionDismissals,
    TrendPoint,
};
pub use value_objects::{
    AnalysisResult, Rating, RatingPolicy, ReviewTimestamp, StoredRating, RESOLUTION_MARKER,
};
