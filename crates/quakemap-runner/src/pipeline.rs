//! The end-to-end pipeline.
//!
//! One explicit function runs the whole flow with no shared state between
//! runs beyond the cache directory: fetch catalogs, assemble one record set
//! per year, combine, reproject, clip to the area of interest, export
//! GeoJSON, then fetch a basemap for the mask bounds and render the map.
//!
//! Failure policy: a year whose download fails is logged and skipped (the
//! next run retries), while parse, CRS, and mask errors abort the run.

use crate::{PipelineConfig, PipelineError, Result};
use quakemap_dataset::{clip_to_mask_file, describe, write_geojson, Crs, RecordSet};
use quakemap_fetch::{BasemapFetcher, CatalogClient};
use quakemap_render::{MapRenderer, PngRenderer};
use tracing::{info, warn};

/// Row counts and outcomes of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Years requested in the configuration.
    pub years_requested: usize,
    /// Years whose catalog file was fetched or already cached.
    pub years_loaded: usize,
    /// Rows in the combined record set.
    pub rows_combined: usize,
    /// Rows remaining after clipping to the mask.
    pub rows_clipped: usize,
    /// Whether a map image was written.
    pub map_rendered: bool,
}

/// Run the pipeline described by the configuration.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    let client = CatalogClient::with_base_url(&config.data_dir, &config.catalog_base_url)?;

    // Fetch phase: per-year failures are recoverable.
    let mut sets = Vec::new();
    for (year, result) in client.fetch_years(&config.years) {
        match result {
            Ok(path) => sets.push(RecordSet::from_file(path, Crs::WGS84)?),
            Err(_) => warn!(year, "no catalog data for year, skipping"),
        }
    }
    if sets.is_empty() {
        return Err(PipelineError::NoCatalogData);
    }
    let years_loaded = sets.len();

    // Transform phase: combine, reproject, clip.
    let combined = RecordSet::combine(sets)?;
    let target = Crs::from_epsg(config.target_epsg);
    let projected = combined.reproject(target)?;
    describe(&projected);

    let (mask, clipped) = clip_to_mask_file(&projected, &config.mask_path)?;
    describe(&clipped);

    write_geojson(&clipped, config.geojson_output())?;

    // Render phase: basemap trouble degrades the map, never the data.
    let mut map_rendered = false;
    if config.render {
        let renderer = PngRenderer::default();
        let basemap = if target == Crs::WEB_MERCATOR {
            fetch_basemap(config, &mask)
        } else {
            warn!(%target, "basemap tiles are Web Mercator only, rendering without basemap");
            None
        };
        renderer.render(&clipped, basemap.as_ref(), &config.map_output())?;
        map_rendered = true;
    }

    let summary = PipelineSummary {
        years_requested: config.years.len(),
        years_loaded,
        rows_combined: projected.len(),
        rows_clipped: clipped.len(),
        map_rendered,
    };
    info!(?summary, "pipeline finished");
    Ok(summary)
}

/// Fetch the basemap raster for the mask bounds; failures are logged and
/// rendering falls back to a blank background.
fn fetch_basemap(
    config: &PipelineConfig,
    mask: &quakemap_dataset::Mask,
) -> Option<quakemap_fetch::BasemapRaster> {
    let (west, south, east, north) = mask.total_bounds()?;
    let mut fetcher = match BasemapFetcher::with_zoom(config.tile_cache_dir(), config.basemap_zoom)
    {
        Ok(f) => f,
        Err(e) => {
            warn!(error = %e, "cannot set up basemap fetcher");
            return None;
        }
    };
    fetcher.set_base_url(&config.tile_base_url);
    match fetcher.bounds_to_raster(west, south, east, north, &config.basemap_path()) {
        Ok(raster) => Some(raster),
        Err(e) => {
            warn!(error = %e, "basemap unavailable, rendering without it");
            None
        }
    }
}
