//! Error types for rendering.

use thiserror::Error;

/// Errors that can occur while rendering a map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// I/O error writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster decode or encode error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Nothing to draw: empty record set and no basemap to fall back on.
    #[error("Cannot render an empty record set without a basemap")]
    NothingToRender,
}
