//! Line-by-line report scanning with per-line validation.
//!
//! The field extractors in [`crate::fields`] run independently over the
//! whole report, so a single malformed line would silently shorten one
//! sequence and shift every later row's attribution. The scanner closes
//! that hole: it classifies each line up front and insists that a record
//! line yields exactly one value from every extractor, turning a partial
//! match into an explicit [`ExtractError::MalformedRecord`].
//!
//! A line is a record candidate iff it carries a `YYYY MMM D` date token;
//! catalog headers and blank lines never do and are skipped.

use crate::{fields, ExtractError, Result};
use chrono::{NaiveDate, NaiveTime};
use geo::Point;

/// One fully parsed catalog line.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordLine {
    /// Event date (GMT).
    pub date: NaiveDate,
    /// Event time of day (GMT), microsecond precision.
    pub time: NaiveTime,
    /// Event latitude in degrees north.
    pub latitude: f64,
    /// Event longitude in degrees east.
    pub longitude: f64,
    /// Focal depth in kilometres.
    pub depth_km: i32,
    /// Local magnitude.
    pub magnitude: f64,
}

impl RecordLine {
    /// The event location as an `(x=lon, y=lat)` point.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Scan a raw report into validated record lines, in text order.
pub fn scan_report(text: &str) -> Result<Vec<RecordLine>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if !fields::has_date_token(line) {
            continue;
        }
        let record = parse_line(line).map_err(|e| match e {
            // Keep token-level errors; they name the bad value directly.
            ExtractError::InvalidMonth(_)
            | ExtractError::InvalidDate { .. }
            | ExtractError::InvalidTime(_)
            | ExtractError::InvalidNumber(_) => e,
            _ => ExtractError::MalformedRecord {
                line_number: idx + 1,
                content: line.to_string(),
            },
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Parse one candidate line, requiring exactly one value per field.
fn parse_line(line: &str) -> Result<RecordLine> {
    let date = single(fields::dates(line)?)?;
    let time = single(fields::times(line)?)?;
    let latitude = single(fields::latitudes(line)?)?;
    let longitude = single(fields::longitudes(line)?)?;
    let depth_km = single(fields::depths(line)?)?;
    let magnitude = single(fields::magnitudes(line)?)?;
    Ok(RecordLine {
        date,
        time,
        latitude,
        longitude,
        depth_km,
        magnitude,
    })
}

fn single<T>(mut values: Vec<T>) -> Result<T> {
    if values.len() != 1 {
        // Placeholder error; scan_report rewrites it with line context.
        return Err(ExtractError::MalformedRecord {
            line_number: 0,
            content: String::new(),
        });
    }
    Ok(values.remove(0))
}
