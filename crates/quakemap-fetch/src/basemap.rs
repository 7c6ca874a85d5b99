//! Basemap raster assembly from cached slippy-map tiles.
//!
//! CartoDB Positron serves 256x256 PNG tiles in the OpenStreetMap slippy
//! scheme: `{base}/{z}/{x}/{y}.png` with `x` growing eastward from 180°W
//! and `y` growing southward from ~85.05°N. Tile indices are derived
//! directly in Web Mercator meters, the CRS the clipped record sets are
//! rendered in, so a bounding box maps onto a tile rectangle without going
//! through geographic coordinates.
//!
//! [`BasemapFetcher::bounds_to_raster`] downloads the covering tiles (each
//! cached on disk individually), stitches them into one PNG, and reports
//! the stitched raster's Web Mercator bounds so a renderer can place
//! geometries on it. An existing raster file is reused without any network
//! traffic.

use crate::{FetchError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Half the Web Mercator world width in meters (pi * 6378137).
pub const HALF_WORLD_M: f64 = 20_037_508.342_789_244;

/// Base URL of the CartoDB Positron tile service.
pub const DEFAULT_TILE_BASE_URL: &str = "https://basemaps.cartocdn.com/light_all";

/// Minimum valid zoom level.
pub const MIN_ZOOM: u8 = 1;

/// Maximum valid zoom level for the Positron tiles.
pub const MAX_ZOOM: u8 = 19;

/// Default zoom level, a regional-scale view.
pub const DEFAULT_ZOOM: u8 = 12;

/// HTTP timeout for tile downloads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Slippy-map tile coordinates (z, x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level (1-19).
    pub z: u8,
    /// Column, 0 at 180°W, increases eastward.
    pub x: u32,
    /// Row, 0 at ~85.05°N, increases southward.
    pub y: u32,
}

impl TileCoord {
    /// Tile containing a Web Mercator point at the given zoom.
    pub fn from_mercator(x_m: f64, y_m: f64, z: u8) -> Result<Self> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&z) {
            return Err(FetchError::InvalidZoomLevel(z));
        }
        let n = (1u32 << z) as f64;
        let fx = (x_m + HALF_WORLD_M) / (2.0 * HALF_WORLD_M);
        let fy = (HALF_WORLD_M - y_m) / (2.0 * HALF_WORLD_M);

        // Clamp so points exactly on the world edge land in the last tile.
        let max_coord = (1u32 << z) - 1;
        let x = ((fx * n).floor() as i64).clamp(0, max_coord as i64) as u32;
        let y = ((fy * n).floor() as i64).clamp(0, max_coord as i64) as u32;
        Ok(Self { z, x, y })
    }

    /// Web Mercator bounds of this tile as `(west, south, east, north)`.
    pub fn mercator_bounds(&self) -> (f64, f64, f64, f64) {
        let n = (1u32 << self.z) as f64;
        let world = 2.0 * HALF_WORLD_M;
        let west = self.x as f64 / n * world - HALF_WORLD_M;
        let east = (self.x + 1) as f64 / n * world - HALF_WORLD_M;
        let north = HALF_WORLD_M - self.y as f64 / n * world;
        let south = HALF_WORLD_M - (self.y + 1) as f64 / n * world;
        (west, south, east, north)
    }

    /// Tile URL under a slippy-map base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/{}/{}.png", base_url, self.z, self.x, self.y)
    }

    /// Cache file path for this tile.
    pub fn cache_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir
            .join(self.z.to_string())
            .join(self.x.to_string())
            .join(format!("{}.png", self.y))
    }
}

/// A stitched basemap raster and its placement in Web Mercator space.
#[derive(Debug, Clone, PartialEq)]
pub struct BasemapRaster {
    /// PNG file holding the stitched tiles.
    pub path: PathBuf,
    /// West edge in Web Mercator meters.
    pub west: f64,
    /// South edge.
    pub south: f64,
    /// East edge.
    pub east: f64,
    /// North edge.
    pub north: f64,
}

/// Tile fetcher with a local cache, stitching bounding boxes into rasters.
pub struct BasemapFetcher {
    cache_dir: PathBuf,
    base_url: String,
    zoom: u8,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for BasemapFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasemapFetcher")
            .field("cache_dir", &self.cache_dir)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl BasemapFetcher {
    /// Create a fetcher with the default zoom level.
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        Self::with_zoom(cache_dir, DEFAULT_ZOOM)
    }

    /// Create a fetcher with a specified zoom level.
    pub fn with_zoom<P: AsRef<Path>>(cache_dir: P, zoom: u8) -> Result<Self> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(FetchError::InvalidZoomLevel(zoom));
        }
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            cache_dir,
            base_url: DEFAULT_TILE_BASE_URL.to_string(),
            zoom,
            client,
        })
    }

    /// Override the tile service base URL (used by tests).
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    /// The zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Fetch one tile, using the disk cache if present.
    pub fn fetch_tile(&self, coord: &TileCoord) -> Result<PathBuf> {
        let cache_path = coord.cache_path(&self.cache_dir);
        if cache_path.exists() {
            return Ok(cache_path);
        }
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let url = coord.url(&self.base_url);
        debug!(%url, "downloading basemap tile");
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url,
                status: response.status(),
            });
        }
        let bytes = response.bytes()?;

        let mut file = fs::File::create(&cache_path)?;
        file.write_all(&bytes)?;
        Ok(cache_path)
    }

    /// Stitch the tiles covering a Web Mercator bounding box into one PNG.
    ///
    /// The raster covers the full tile rectangle, so its bounds are the
    /// tile-aligned expansion of the request. If `path` already exists the
    /// stitch (and every download) is skipped and only the placement is
    /// recomputed.
    pub fn bounds_to_raster(
        &self,
        west: f64,
        south: f64,
        east: f64,
        north: f64,
        path: &Path,
    ) -> Result<BasemapRaster> {
        if west >= east || south >= north {
            return Err(FetchError::InvalidBounds {
                west,
                south,
                east,
                north,
            });
        }

        let tl = TileCoord::from_mercator(west, north, self.zoom)?;
        let br = TileCoord::from_mercator(east, south, self.zoom)?;
        let (raster_west, _, _, raster_north) = tl.mercator_bounds();
        let (_, raster_south, raster_east, _) = br.mercator_bounds();
        let raster = BasemapRaster {
            path: path.to_path_buf(),
            west: raster_west,
            south: raster_south,
            east: raster_east,
            north: raster_north,
        };

        if path.exists() {
            info!(path = %path.display(), "basemap raster already downloaded");
            return Ok(raster);
        }

        let cols = br.x - tl.x + 1;
        let rows = br.y - tl.y + 1;
        info!(tiles = cols * rows, zoom = self.zoom, "stitching basemap raster");

        let mut canvas = image::RgbaImage::new(cols * TILE_SIZE, rows * TILE_SIZE);
        for x in tl.x..=br.x {
            for y in tl.y..=br.y {
                let coord = TileCoord {
                    z: self.zoom,
                    x,
                    y,
                };
                let tile_path = self.fetch_tile(&coord)?;
                let tile = image::open(&tile_path)?.to_rgba8();
                image::imageops::replace(
                    &mut canvas,
                    &tile,
                    ((x - tl.x) * TILE_SIZE) as i64,
                    ((y - tl.y) * TILE_SIZE) as i64,
                );
            }
        }
        canvas.save(path)?;
        Ok(raster)
    }
}
