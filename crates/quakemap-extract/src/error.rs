//! Error types for catalog text extraction.

use thiserror::Error;

/// Errors that can occur while extracting fields from catalog text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A date token carried a month abbreviation that is not a real month.
    #[error("Unrecognized month abbreviation: {0:?}")]
    InvalidMonth(String),

    /// A date token matched the coarse pattern but is not a valid calendar date.
    #[error("Invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month number (1-12).
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// A time token matched the coarse pattern but is not a valid time of day.
    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),

    /// A numeric token matched the coarse pattern but does not parse.
    #[error("Invalid numeric field: {0:?}")]
    InvalidNumber(String),

    /// Longitude and latitude sequences differ in length.
    #[error("Coordinate count mismatch: {longitudes} longitudes vs {latitudes} latitudes")]
    CoordinateCountMismatch {
        /// Number of extracted longitudes.
        longitudes: usize,
        /// Number of extracted latitudes.
        latitudes: usize,
    },

    /// A line carried a date token but did not yield exactly one value per field.
    #[error("Malformed record at line {line_number}: {content:?}")]
    MalformedRecord {
        /// 1-based line number within the report.
        line_number: usize,
        /// The offending line.
        content: String,
    },
}
