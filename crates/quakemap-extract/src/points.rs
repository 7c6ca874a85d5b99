//! Pairing of extracted coordinate sequences into points.

use crate::{fields, ExtractError, Result};
use geo::Point;

/// Pair same-index longitude/latitude entries into `(x=lon, y=lat)` points.
///
/// The two sequences must be index-aligned and equally long; a length
/// mismatch means the extractors desynchronized on a malformed report and
/// is reported as a structured error rather than an index panic.
pub fn pair_points(longitudes: &[f64], latitudes: &[f64]) -> Result<Vec<Point<f64>>> {
    if longitudes.len() != latitudes.len() {
        return Err(ExtractError::CoordinateCountMismatch {
            longitudes: longitudes.len(),
            latitudes: latitudes.len(),
        });
    }
    Ok(longitudes
        .iter()
        .zip(latitudes)
        .map(|(&lon, &lat)| Point::new(lon, lat))
        .collect())
}

/// Extract both coordinate sequences from a report and pair them.
pub fn points_from_text(text: &str) -> Result<Vec<Point<f64>>> {
    let lons = fields::longitudes(text)?;
    let lats = fields::latitudes(text)?;
    pair_points(&lons, &lats)
}
