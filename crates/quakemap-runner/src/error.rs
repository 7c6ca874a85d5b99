//! Error types for the pipeline runner.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Could not read the configuration file.
    #[error("Cannot read config {}: {source}", .path.display())]
    ConfigRead {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration file did not parse.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Catalog or basemap fetching failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] quakemap_fetch::FetchError),

    /// Record assembly or transformation failed.
    #[error("Dataset error: {0}")]
    Dataset(#[from] quakemap_dataset::DatasetError),

    /// Map rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] quakemap_render::RenderError),

    /// No catalog file could be fetched or found in the cache.
    #[error("No catalog data available for any requested year")]
    NoCatalogData,
}
