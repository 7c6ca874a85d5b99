//! Coordinate reference systems and the geographic/Web Mercator transform.
//!
//! The pipeline only ever moves between EPSG:4326 (geographic degrees) and
//! EPSG:3857 (spherical Web Mercator meters), the same projection family the
//! slippy-map tile scheme is built on, so the transform is the closed-form
//! spherical Mercator pair rather than a full projection library.

use crate::{DatasetError, Result};
use geo::{Coord, MapCoords};
use std::f64::consts::PI;
use std::fmt;

/// Earth radius used by spherical Web Mercator (meters).
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// An EPSG coordinate reference system code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs(u32);

impl Crs {
    /// Geographic coordinates, degrees (EPSG:4326).
    pub const WGS84: Crs = Crs(4326);

    /// Spherical Web Mercator, meters (EPSG:3857).
    pub const WEB_MERCATOR: Crs = Crs(3857);

    /// Wrap a raw EPSG code.
    pub fn from_epsg(code: u32) -> Self {
        Crs(code)
    }

    /// The numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Transform a geometry's coordinates from one CRS to another.
///
/// Supported pairs are 4326 <-> 3857 (and the identity transform). Any other
/// combination is an [`DatasetError::UnsupportedReprojection`].
pub fn transform<G>(geometry: &G, from: Crs, to: Crs) -> Result<G>
where
    G: MapCoords<f64, f64, Output = G>,
{
    match (from, to) {
        _ if from == to => Ok(geometry.map_coords(|c| c)),
        (Crs::WGS84, Crs::WEB_MERCATOR) => Ok(geometry.map_coords(degrees_to_mercator)),
        (Crs::WEB_MERCATOR, Crs::WGS84) => Ok(geometry.map_coords(mercator_to_degrees)),
        _ => Err(DatasetError::UnsupportedReprojection { from, to }),
    }
}

fn degrees_to_mercator(c: Coord<f64>) -> Coord<f64> {
    // Web Mercator is undefined at the poles; clamp like the tile scheme does.
    let lat = c.y.clamp(-85.0511, 85.0511);
    Coord {
        x: EARTH_RADIUS_M * c.x.to_radians(),
        y: EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln(),
    }
}

fn mercator_to_degrees(c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (c.x / EARTH_RADIUS_M).to_degrees(),
        y: (2.0 * (c.y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::Point;

    #[test]
    fn test_display() {
        assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
        assert_eq!(Crs::from_epsg(3857), Crs::WEB_MERCATOR);
    }

    #[test]
    fn test_origin_maps_to_origin() {
        let p = transform(&Point::new(0.0, 0.0), Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
        assert_relative_eq!(p.x(), 0.0);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_known_point() {
        // Patras region, checked against the standard EPSG:3857 forward formula.
        let p = transform(&Point::new(21.9832, 38.3894), Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
        assert_relative_eq!(p.x(), 2_447_158.6, epsilon = 50.0);
        assert_relative_eq!(p.y(), 4_634_584.0, epsilon = 50.0);
    }

    #[test]
    fn test_roundtrip_within_tolerance() {
        let original = Point::new(25.3047, 40.7128);
        let forward = transform(&original, Crs::WGS84, Crs::WEB_MERCATOR).unwrap();
        let back = transform(&forward, Crs::WEB_MERCATOR, Crs::WGS84).unwrap();
        assert_relative_eq!(back.x(), original.x(), epsilon = 1e-6);
        assert_relative_eq!(back.y(), original.y(), epsilon = 1e-6);
    }

    #[test]
    fn test_identity_transform() {
        let p = Point::new(21.9832, 38.3894);
        let same = transform(&p, Crs::WGS84, Crs::WGS84).unwrap();
        assert_eq!(same, p);
    }

    #[test]
    fn test_unsupported_pair() {
        let p = Point::new(0.0, 0.0);
        let err = transform(&p, Crs::from_epsg(2100), Crs::WEB_MERCATOR).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedReprojection { .. }));
    }
}
