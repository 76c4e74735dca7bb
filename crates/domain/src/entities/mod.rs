//! Domain Entities - Core business objects

pub mod review;
pub mod review_id;

pub use review::Review;
pub use review_id::ReviewId;
