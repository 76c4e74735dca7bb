//! Repository Abstractions - interfaces для persistence

pub mod review_store;

pub use review_store::ReviewStore;
