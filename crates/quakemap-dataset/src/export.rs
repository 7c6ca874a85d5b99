//! GeoJSON export of record sets.
//!
//! The output is a FeatureCollection with one point feature per event and
//! the attribute columns of the original catalog table: `Date` (day-first),
//! `Time(GMT)`, `Depth(km)`, `Magnitude(Local)`, and `Month`.

use crate::{RecordSet, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use quakemap_extract::fields::{format_date, format_time};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a record set to a GeoJSON file.
pub fn write_geojson<P: AsRef<Path>>(set: &RecordSet, path: P) -> Result<()> {
    let features = set
        .records()
        .iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert("Date".into(), JsonValue::from(format_date(&record.date)));
            properties.insert(
                "Time(GMT)".into(),
                JsonValue::from(format_time(&record.time)),
            );
            properties.insert("Depth(km)".into(), JsonValue::from(record.depth_km));
            properties.insert(
                "Magnitude(Local)".into(),
                JsonValue::from(record.magnitude),
            );
            properties.insert("Month".into(), JsonValue::from(record.month.clone()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&record.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    fs::write(path.as_ref(), serde_json::to_string_pretty(&collection)?)?;
    info!(rows = set.len(), path = %path.as_ref().display(), "wrote GeoJSON export");
    Ok(())
}
