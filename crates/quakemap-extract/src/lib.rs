//! # quakemap-extract
//!
//! Field extraction for National Observatory of Athens earthquake catalog
//! files (`CAT{year}.TXT`). The catalog is fixed-width text with no
//! delimiters, so every field is recovered by a pattern over the spacing
//! runs that separate the numeric columns.
//!
//! Two layers are exposed:
//! - [`fields`] - the six independent extractors (dates, times, latitudes,
//!   longitudes, depths, magnitudes), each returning one value per matching
//!   line in text order, plus [`points::pair_points`] to zip the coordinate
//!   sequences into `geo` points.
//! - [`scan_report`] - a line-oriented scanner that validates every record
//!   line as a whole and fails with a [`ExtractError::MalformedRecord`]
//!   naming the line instead of letting a partial match silently shift the
//!   columns of later rows.
//!
//! ## Example
//!
//! ```
//! use quakemap_extract::scan_report;
//!
//! let report = "2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2";
//! let records = scan_report(report)?;
//! assert_eq!(records[0].magnitude, 1.2);
//! # Ok::<(), quakemap_extract::ExtractError>(())
//! ```

mod error;
pub mod fields;
pub mod points;
mod scan;

pub use error::ExtractError;
pub use points::{pair_points, points_from_text};
pub use scan::{scan_report, RecordLine};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
