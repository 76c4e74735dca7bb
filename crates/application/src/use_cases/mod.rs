//! Use Cases

pub mod intake_pipeline;

pub use intake_pipeline::{Clock, IntakePipeline, SystemClock};
