//! Text-generation backends used by the feedback analysis step.
//!
//! Each provider performs exactly one HTTP call per request. There is no
//! retry, circuit breaker or multi-provider fallback at this layer: callers
//! decide what a failed call means.

pub mod providers;

pub use providers::*;
