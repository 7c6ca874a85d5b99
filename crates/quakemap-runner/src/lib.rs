//! # quakemap-runner
//!
//! The `quakemap` binary's library: configuration loading and the explicit
//! pipeline function. Kept as a library so integration tests can drive full
//! runs against local fixture files.

mod config;
mod error;
mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{run_pipeline, PipelineSummary};

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
