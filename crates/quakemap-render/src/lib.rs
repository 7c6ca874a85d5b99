//! # quakemap-render
//!
//! Rendering of earthquake record sets as PNG maps. The renderer is a
//! pluggable collaborator behind the [`MapRenderer`] trait so the pipeline
//! never hardcodes a drawing backend; [`PngRenderer`] is the bundled
//! implementation, plotting each event as a disk colored by magnitude over
//! an optional basemap raster, with a color-bar legend.

mod error;
mod png;

pub use error::RenderError;
pub use png::PngRenderer;

use quakemap_dataset::RecordSet;
use quakemap_fetch::BasemapRaster;
use std::path::Path;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// A rendering collaborator consuming a record set and an optional
/// precomputed basemap raster.
pub trait MapRenderer {
    /// Draw the record set to `out`.
    ///
    /// With a basemap, geometries are placed using the raster's Web
    /// Mercator bounds; without one, the set's own bounding box (plus a
    /// margin) defines the view.
    fn render(&self, set: &RecordSet, basemap: Option<&BasemapRaster>, out: &Path) -> Result<()>;
}
