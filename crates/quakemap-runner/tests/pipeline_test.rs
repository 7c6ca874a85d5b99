//! Full pipeline runs against local fixture files.
//!
//! The catalog base URL points at an unroutable address, so every test
//! exercises the cache path: catalogs are pre-populated on disk the way a
//! previous run would have left them.

use quakemap_runner::{run_pipeline, PipelineConfig, PipelineError};
use std::fs;
use std::path::Path;

const CAT2021: &str = "\
DATE         TIME     LAT.   LONG.  DEPTH    MAGNITUDE
                    (GMT)    (N)    (E)    (km)       (Local)
2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2
2021 FEB 15   14 30 59.1 40.7128 25.3047  100        5.8
";

const CAT2022: &str = "\
2022 MAR  3   07 12 11.5 38.4102 22.0511   12        3.4
";

// 2x2 degree square around the Gulf of Corinth; keeps the 2021 JAN and
// 2022 MAR events, drops the northern 2021 FEB one.
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

fn write_fixtures(dir: &Path) -> PipelineConfig {
    let data_dir = dir.join("Data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("CAT2021.TXT"), CAT2021).unwrap();
    fs::write(data_dir.join("CAT2022.TXT"), CAT2022).unwrap();
    let mask_path = data_dir.join("mask.geojson");
    fs::write(&mask_path, MASK).unwrap();

    let yaml = format!(
        "years: [2021, 2022]\n\
         mask_path: {}\n\
         data_dir: {}\n\
         catalog_base_url: http://127.0.0.1:1\n\
         tile_base_url: http://127.0.0.1:1\n\
         render: false\n",
        mask_path.display(),
        data_dir.display()
    );
    let config_path = dir.join("quakemap.yaml");
    fs::write(&config_path, yaml).unwrap();
    PipelineConfig::from_yaml_file(config_path).unwrap()
}

#[test]
fn test_pipeline_from_cached_catalogs() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixtures(dir.path());

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.years_requested, 2);
    assert_eq!(summary.years_loaded, 2);
    assert_eq!(summary.rows_combined, 3);
    assert_eq!(summary.rows_clipped, 2);
    assert!(!summary.map_rendered);

    // The GeoJSON export holds exactly the clipped rows.
    let exported = fs::read_to_string(config.geojson_output()).unwrap();
    let parsed: geojson::GeoJson = exported.parse().unwrap();
    let collection = geojson::FeatureCollection::try_from(parsed).unwrap();
    assert_eq!(collection.features.len(), 2);
}

#[test]
fn test_pipeline_skips_unfetchable_year() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixtures(dir.path());
    // 2023 was never downloaded and the server is unreachable.
    config.years = vec![2021, 2023];

    let summary = run_pipeline(&config).unwrap();
    assert_eq!(summary.years_requested, 2);
    assert_eq!(summary.years_loaded, 1);
    assert_eq!(summary.rows_combined, 2);
}

#[test]
fn test_pipeline_fails_without_any_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixtures(dir.path());
    config.years = vec![1999];

    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, PipelineError::NoCatalogData));
}

#[test]
fn test_pipeline_renders_without_basemap() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_fixtures(dir.path());
    // Unreachable tile server: rendering must fall back to a blank map.
    config.render = true;

    let summary = run_pipeline(&config).unwrap();
    assert!(summary.map_rendered);
    assert!(config.map_output().exists());
}

#[test]
fn test_pipeline_rejects_bad_catalog_line() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixtures(dir.path());
    fs::write(
        config.data_dir.join("CAT2021.TXT"),
        "2021 JAN  1   00 38 24.3 38.3894\n",
    )
    .unwrap();

    let err = run_pipeline(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Dataset(_)));
}
