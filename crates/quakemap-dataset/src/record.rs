//! Earthquake record sets.
//!
//! A [`RecordSet`] is the tabular form of one or more catalog reports: one
//! [`EventRecord`] per catalog line, tagged with the coordinate reference
//! system of the geometry column. Sets are never edited field by field after
//! assembly; combination, reprojection, and clipping each produce a new set.

use crate::{crs, Crs, DatasetError, Result};
use chrono::{NaiveDate, NaiveTime};
use geo::Point;
use quakemap_extract::scan_report;
use std::fs;
use std::path::Path;
use tracing::info;

/// One earthquake event row.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event date (GMT), the set's ordering key.
    pub date: NaiveDate,
    /// Event time of day (GMT).
    pub time: NaiveTime,
    /// Focal depth in kilometres.
    pub depth_km: i32,
    /// Local magnitude.
    pub magnitude: f64,
    /// English month name derived from the date.
    pub month: String,
    /// Event location in the set's CRS.
    pub geometry: Point<f64>,
}

/// A table of earthquake events with an associated CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<EventRecord>,
    crs: Crs,
}

impl RecordSet {
    /// Assemble a record set from raw report text.
    ///
    /// Every record line must parse completely; a line that matches the
    /// date pattern but not the full layout fails the whole assembly (see
    /// [`quakemap_extract::scan_report`]).
    pub fn from_report(text: &str, crs: Crs) -> Result<Self> {
        let records = scan_report(text)?
            .into_iter()
            .map(|line| EventRecord {
                month: line.date.format("%B").to_string(),
                geometry: line.point(),
                date: line.date,
                time: line.time,
                depth_km: line.depth_km,
                magnitude: line.magnitude,
            })
            .collect();
        Ok(Self { records, crs })
    }

    /// Assemble a record set from a catalog file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P, crs: Crs) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_report(&text, crs)
    }

    /// Concatenate several record sets into one, preserving row order.
    ///
    /// All sets must share a CRS. Row identity is positional in the result;
    /// the per-set ordering keys are discarded while the date column is
    /// kept as data.
    pub fn combine<I: IntoIterator<Item = RecordSet>>(sets: I) -> Result<Self> {
        let mut iter = sets.into_iter();
        let mut combined = match iter.next() {
            Some(first) => first,
            None => {
                return Ok(Self {
                    records: Vec::new(),
                    crs: Crs::WGS84,
                })
            }
        };
        for set in iter {
            if set.crs != combined.crs {
                return Err(DatasetError::CrsMismatch {
                    expected: combined.crs,
                    found: set.crs,
                });
            }
            combined.records.extend(set.records);
        }
        Ok(combined)
    }

    /// Transform the geometry column to a new CRS.
    ///
    /// Returns a new set with the same rows and a rewritten geometry column.
    pub fn reproject(&self, target: Crs) -> Result<Self> {
        let records = self
            .records
            .iter()
            .map(|r| {
                Ok(EventRecord {
                    geometry: crs::transform(&r.geometry, self.crs, target)?,
                    ..r.clone()
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            records,
            crs: target,
        })
    }

    /// The rows, in assembly order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// The coordinate reference system of the geometry column.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bounding box of the geometry column as `(west, south, east, north)`,
    /// or `None` for an empty set.
    pub fn total_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.records.iter().map(|r| r.geometry);
        let first = points.next()?;
        let mut bounds = (first.x(), first.y(), first.x(), first.y());
        for p in points {
            bounds.0 = bounds.0.min(p.x());
            bounds.1 = bounds.1.min(p.y());
            bounds.2 = bounds.2.max(p.x());
            bounds.3 = bounds.3.max(p.y());
        }
        Some(bounds)
    }

    /// Keep only the rows whose geometry satisfies the predicate.
    pub(crate) fn filter_rows<F: FnMut(&EventRecord) -> bool>(&self, mut keep: F) -> Self {
        Self {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
            crs: self.crs,
        }
    }
}

/// Log a row/column summary with head and tail previews.
pub fn describe(set: &RecordSet) {
    // Date, Time, Depth, Magnitude, Month, geometry.
    info!(rows = set.len(), columns = 6, crs = %set.crs(), "record set");
    for record in set.records().iter().take(5) {
        info!(?record, "head");
    }
    if set.len() > 5 {
        for record in set.records().iter().skip(set.len().saturating_sub(5)) {
            info!(?record, "tail");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakemap_extract::fields::{format_date, format_time};

    const SAMPLE_2021: &str = "\
DATE         TIME     LAT.   LONG.  DEPTH    MAGNITUDE
                    (GMT)    (N)    (E)    (km)       (Local)
2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2
2021 FEB 15   14 30 59.1 40.7128 25.3047  100        5.8
";

    const SAMPLE_2022: &str = "\
2022 MAR  3   07 12 11.5 35.3412 25.1442   12        3.4
";

    #[test]
    fn test_from_report() {
        let set = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.crs(), Crs::WGS84);

        let first = &set.records()[0];
        assert_eq!(format_date(&first.date), "01/01/2021");
        assert_eq!(format_time(&first.time), "00:38:24.300000");
        assert_eq!(first.depth_km, 8);
        assert_eq!(first.magnitude, 1.2);
        assert_eq!(first.month, "January");
        assert_eq!(first.geometry, Point::new(21.9832, 38.3894));

        assert_eq!(set.records()[1].month, "February");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CAT2021.TXT");
        fs::write(&path, SAMPLE_2021).unwrap();
        let set = RecordSet::from_file(&path, Crs::WGS84).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_report_rejects_malformed_line() {
        let text = "2021 JAN  1   00 38 24.3 38.3894\n";
        assert!(RecordSet::from_report(text, Crs::WGS84).is_err());
    }

    #[test]
    fn test_combine_preserves_order() {
        let a = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        let b = RecordSet::from_report(SAMPLE_2022, Crs::WGS84).unwrap();
        let combined = RecordSet::combine([a.clone(), b.clone()]).unwrap();
        assert_eq!(combined.len(), 3);
        assert_eq!(combined.records()[..2], a.records()[..]);
        assert_eq!(combined.records()[2..], b.records()[..]);
    }

    #[test]
    fn test_combine_is_associative() {
        let a = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        let b = RecordSet::from_report(SAMPLE_2022, Crs::WGS84).unwrap();
        let c = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();

        let left = RecordSet::combine([
            RecordSet::combine([a.clone(), b.clone()]).unwrap(),
            c.clone(),
        ])
        .unwrap();
        let right =
            RecordSet::combine([a, RecordSet::combine([b, c]).unwrap()]).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_combine_rejects_crs_mismatch() {
        let a = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        let b = RecordSet::from_report(SAMPLE_2022, Crs::WEB_MERCATOR).unwrap();
        let err = RecordSet::combine([a, b]).unwrap_err();
        assert!(matches!(err, DatasetError::CrsMismatch { .. }));
    }

    #[test]
    fn test_reproject_roundtrip() {
        use approx::assert_relative_eq;

        let set = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        let mercator = set.reproject(Crs::WEB_MERCATOR).unwrap();
        assert_eq!(mercator.crs(), Crs::WEB_MERCATOR);
        assert_eq!(mercator.len(), set.len());

        let back = mercator.reproject(Crs::WGS84).unwrap();
        for (orig, round) in set.records().iter().zip(back.records()) {
            assert_relative_eq!(round.geometry.x(), orig.geometry.x(), epsilon = 1e-6);
            assert_relative_eq!(round.geometry.y(), orig.geometry.y(), epsilon = 1e-6);
            assert_eq!(round.magnitude, orig.magnitude);
        }
    }

    #[test]
    fn test_total_bounds() {
        let set = RecordSet::from_report(SAMPLE_2021, Crs::WGS84).unwrap();
        let (w, s, e, n) = set.total_bounds().unwrap();
        assert_eq!((w, s, e, n), (21.9832, 38.3894, 25.3047, 40.7128));

        let empty = RecordSet::from_report("", Crs::WGS84).unwrap();
        assert!(empty.total_bounds().is_none());
    }
}
