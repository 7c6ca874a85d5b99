//! The full transform chain on one fixture report: assemble, combine,
//! reproject, clip, export.

use approx::assert_relative_eq;
use quakemap_dataset::{clip_to_mask_file, write_geojson, Crs, RecordSet};
use std::fs;

const REPORT: &str = "\
DATE         TIME     LAT.   LONG.  DEPTH    MAGNITUDE
                    (GMT)    (N)    (E)    (km)       (Local)
2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2
2021 FEB 15   14 30 59.1 40.7128 25.3047  100        5.8
";

const MASK: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [21.0, 37.5], [23.0, 37.5], [23.0, 39.5],
                [21.0, 39.5], [21.0, 37.5]
            ]]
        }
    }]
}"#;

#[test]
fn test_assemble_combine_reproject_clip_export() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("CAT2021.TXT");
    fs::write(&report_path, REPORT).unwrap();
    let mask_path = dir.path().join("mask.geojson");
    fs::write(&mask_path, MASK).unwrap();

    let set = RecordSet::from_file(&report_path, Crs::WGS84).unwrap();
    assert_eq!(set.len(), 2);

    let combined = RecordSet::combine([set.clone(), set]).unwrap();
    assert_eq!(combined.len(), 4);

    let projected = combined.reproject(Crs::WEB_MERCATOR).unwrap();
    assert_eq!(projected.crs(), Crs::WEB_MERCATOR);
    // Patras-region longitude in Web Mercator meters.
    assert_relative_eq!(
        projected.records()[0].geometry.x(),
        2_447_158.6,
        epsilon = 50.0
    );

    let (mask, clipped) = clip_to_mask_file(&projected, &mask_path).unwrap();
    assert_eq!(mask.crs(), Crs::WEB_MERCATOR);
    // Both copies of the in-mask event survive, both northern rows drop.
    assert_eq!(clipped.len(), 2);

    let export_path = dir.path().join("events.geojson");
    write_geojson(&clipped, &export_path).unwrap();
    let parsed: geojson::GeoJson = fs::read_to_string(&export_path).unwrap().parse().unwrap();
    let collection = geojson::FeatureCollection::try_from(parsed).unwrap();
    assert_eq!(collection.features.len(), 2);
    let props = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(props["Month"], "January");
}
