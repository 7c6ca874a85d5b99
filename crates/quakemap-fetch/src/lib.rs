//! # quakemap-fetch
//!
//! Network fetching for the earthquake map pipeline, all behind a local
//! file cache:
//!
//! - [`CatalogClient`] downloads the yearly NOA catalog files
//!   (`CAT{year}.TXT`), skipping years already on disk and leaving no file
//!   behind when a download fails.
//! - [`BasemapFetcher`] turns a Web Mercator bounding box into a stitched
//!   PNG raster of CartoDB Positron tiles, caching each tile individually
//!   and reusing an already-stitched raster untouched.
//!
//! Everything is blocking and sequential; the pipeline runs single-process
//! with no concurrent writers to the cache directories.

mod basemap;
mod catalog;
mod error;

pub use basemap::{
    BasemapFetcher, BasemapRaster, TileCoord, DEFAULT_TILE_BASE_URL, DEFAULT_ZOOM, HALF_WORLD_M,
    MAX_ZOOM, MIN_ZOOM, TILE_SIZE,
};
pub use catalog::{CatalogClient, DEFAULT_CATALOG_BASE_URL};
pub use error::FetchError;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
