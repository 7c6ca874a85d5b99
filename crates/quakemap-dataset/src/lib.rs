//! # quakemap-dataset
//!
//! Tabular earthquake record sets built from catalog reports, plus the
//! transformations applied between parsing and rendering:
//!
//! - [`RecordSet::from_report`] / [`RecordSet::from_file`] - assemble one
//!   set per catalog file, tagged with its CRS, with the month column
//!   derived from the event date.
//! - [`RecordSet::combine`] - order-preserving concatenation of sets that
//!   share a CRS.
//! - [`RecordSet::reproject`] - geographic <-> Web Mercator transform of
//!   the geometry column.
//! - [`Mask`] / [`clip`] - GeoJSON area-of-interest boundary and the
//!   spatial row filter against it.
//! - [`write_geojson`] - vector interchange export of a set.
//!
//! Every stage produces a new value; sets are never mutated row by row.

mod crs;
mod error;
mod export;
mod mask;
mod record;

pub use crs::{transform, Crs};
pub use error::DatasetError;
pub use export::write_geojson;
pub use mask::{clip, clip_to_mask_file, Mask};
pub use record::{describe, EventRecord, RecordSet};

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
