//! Domain Value Objects - Immutable domain concepts
//!
//! Value objects представляют business concepts без identity.
//! Immutable по определению.

pub mod analysis;
pub mod rating;
pub mod resolution;
pub mod timestamp;

pub use analysis::AnalysisResult;
pub use rating::{Rating, RatingPolicy, StoredRating};
pub use resolution::{is_resolved, with_resolution_marker, RESOLUTION_MARKER};
pub use timestamp::{ReviewTimestamp, TIMESTAMP_FORMAT};
