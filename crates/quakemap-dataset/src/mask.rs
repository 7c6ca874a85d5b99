//! Area-of-interest masks and spatial clipping.

use crate::{crs, Crs, DatasetError, RecordSet, Result};
use geo::{Geometry, Intersects, MultiPolygon, Polygon};
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Boundary geometry defining the area of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    polygons: MultiPolygon<f64>,
    crs: Crs,
}

impl Mask {
    /// Load a mask from a GeoJSON file.
    ///
    /// All polygon geometries in the file are collected; anything else is
    /// ignored. GeoJSON coordinates are geographic, so the mask starts out
    /// tagged EPSG:4326.
    pub fn from_geojson_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let geojson: GeoJson = fs::read_to_string(path)?.parse()?;
        let collection = geojson::quick_collection(&geojson)?;

        let mut polygons: Vec<Polygon<f64>> = Vec::new();
        for geometry in collection {
            match geometry {
                Geometry::Polygon(p) => polygons.push(p),
                Geometry::MultiPolygon(mp) => polygons.extend(mp),
                _ => {}
            }
        }
        if polygons.is_empty() {
            return Err(DatasetError::EmptyMask(path.to_path_buf()));
        }
        Ok(Self {
            polygons: MultiPolygon(polygons),
            crs: Crs::WGS84,
        })
    }

    /// Build a mask directly from polygons.
    pub fn new(polygons: MultiPolygon<f64>, crs: Crs) -> Self {
        Self { polygons, crs }
    }

    /// The boundary polygons.
    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// The mask's coordinate reference system.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Transform the mask to a new CRS.
    pub fn reproject(&self, target: Crs) -> Result<Self> {
        Ok(Self {
            polygons: crs::transform(&self.polygons, self.crs, target)?,
            crs: target,
        })
    }

    /// Bounding box as `(west, south, east, north)`, or `None` if the mask
    /// has no coordinates.
    pub fn total_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        use geo::BoundingRect;
        let rect = self.polygons.bounding_rect()?;
        Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Restrict a record set to the rows intersecting the mask.
///
/// The mask is reprojected to the record set's CRS first; rows on the
/// boundary are kept (`Intersects` is inclusive).
pub fn clip(set: &RecordSet, mask: &Mask) -> Result<RecordSet> {
    let mask = mask.reproject(set.crs())?;
    Ok(set.filter_rows(|r| mask.polygons.intersects(&r.geometry)))
}

/// Load a mask, reproject it to the record set's CRS, and clip.
///
/// Returns the reprojected mask together with the clipped rows so the
/// caller can reuse the mask bounds (for basemap fetching).
pub fn clip_to_mask_file<P: AsRef<Path>>(
    set: &RecordSet,
    mask_path: P,
) -> Result<(Mask, RecordSet)> {
    let mask = Mask::from_geojson_file(mask_path)?.reproject(set.crs())?;
    let clipped = clip(set, &mask)?;
    Ok((mask, clipped))
}
