//! Error types for the fetch crate.

use thiserror::Error;

/// Errors that can occur while downloading catalogs or basemap tiles.
#[derive(Debug, Error)]
pub enum FetchError {
    /// I/O error writing to the cache.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: reqwest::StatusCode,
    },

    /// Tile decode or raster encode error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid zoom level.
    #[error("Invalid zoom level {0} (must be 1-19)")]
    InvalidZoomLevel(u8),

    /// Degenerate bounding box (west >= east or south >= north).
    #[error("Invalid bounds: w={west} s={south} e={east} n={north}")]
    InvalidBounds {
        /// West edge (Web Mercator meters).
        west: f64,
        /// South edge.
        south: f64,
        /// East edge.
        east: f64,
        /// North edge.
        north: f64,
    },
}
