//! YAML pipeline configuration.
//!
//! Everything the run needs is passed in here; there is no process-wide
//! implicit state. Only `years` and `mask_path` are required:
//!
//! ```yaml
//! years: [2021, 2022]
//! mask_path: Data/mask.geojson
//! data_dir: Data
//! target_epsg: 3857
//! basemap_zoom: 12
//! ```

use crate::{PipelineError, Result};
use quakemap_fetch::{DEFAULT_CATALOG_BASE_URL, DEFAULT_TILE_BASE_URL, DEFAULT_ZOOM};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_data_dir() -> PathBuf {
    PathBuf::from("Data")
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_tile_base_url() -> String {
    DEFAULT_TILE_BASE_URL.to_string()
}

fn default_target_epsg() -> u32 {
    3857
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

fn default_render() -> bool {
    true
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Catalog years to fetch and parse.
    pub years: Vec<i32>,

    /// GeoJSON file with the area-of-interest boundary.
    pub mask_path: PathBuf,

    /// Directory for downloaded catalogs, tiles, and outputs.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the catalog server.
    #[serde(default = "default_base_url")]
    pub catalog_base_url: String,

    /// Base URL of the basemap tile service.
    #[serde(default = "default_tile_base_url")]
    pub tile_base_url: String,

    /// EPSG code the combined set is reprojected to before clipping.
    #[serde(default = "default_target_epsg")]
    pub target_epsg: u32,

    /// Zoom level for the basemap tiles.
    #[serde(default = "default_zoom")]
    pub basemap_zoom: u8,

    /// Whether to fetch a basemap and render the map image.
    #[serde(default = "default_render")]
    pub render: bool,

    /// Stitched basemap output; defaults to `{data_dir}/basemap.png`.
    #[serde(default)]
    pub basemap_path: Option<PathBuf>,

    /// GeoJSON export; defaults to `{data_dir}/earthquakes.geojson`.
    #[serde(default)]
    pub geojson_output: Option<PathBuf>,

    /// Rendered map; defaults to `{data_dir}/map.png`.
    #[serde(default)]
    pub map_output: Option<PathBuf>,
}

impl PipelineConfig {
    /// Load a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Resolved basemap raster path.
    pub fn basemap_path(&self) -> PathBuf {
        self.basemap_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("basemap.png"))
    }

    /// Resolved GeoJSON export path.
    pub fn geojson_output(&self) -> PathBuf {
        self.geojson_output
            .clone()
            .unwrap_or_else(|| self.data_dir.join("earthquakes.geojson"))
    }

    /// Resolved map image path.
    pub fn map_output(&self) -> PathBuf {
        self.map_output
            .clone()
            .unwrap_or_else(|| self.data_dir.join("map.png"))
    }

    /// Tile cache directory.
    pub fn tile_cache_dir(&self) -> PathBuf {
        self.data_dir.join("tiles")
    }
}
