//! Error types for record set operations.

use crate::Crs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when assembling or transforming record sets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O error reading a report or mask file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Field extraction failed.
    #[error("Extraction error: {0}")]
    Extract(#[from] quakemap_extract::ExtractError),

    /// GeoJSON parse error.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// JSON serialization error during export.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record sets with different reference systems cannot be combined.
    #[error("CRS mismatch: expected {expected}, found {found}")]
    CrsMismatch {
        /// CRS of the first set.
        expected: Crs,
        /// CRS of the offending set.
        found: Crs,
    },

    /// Only the geographic/Web Mercator pair is supported.
    #[error("Unsupported reprojection from {from} to {to}")]
    UnsupportedReprojection {
        /// Source CRS.
        from: Crs,
        /// Target CRS.
        to: Crs,
    },

    /// The mask file contained no polygon geometry.
    #[error("Mask file {} contains no polygon geometry", .0.display())]
    EmptyMask(PathBuf),
}
