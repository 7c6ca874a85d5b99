//! PNG map renderer.

use crate::{MapRenderer, RenderError, Result};
use image::{Rgba, RgbaImage};
use palette::{LinSrgb, Mix};
use quakemap_dataset::RecordSet;
use quakemap_fetch::BasemapRaster;
use std::path::Path;
use tracing::info;

/// Canvas width used when rendering without a basemap.
const FALLBACK_WIDTH: u32 = 1024;

/// Margin added around the record bounds when rendering without a basemap.
const FALLBACK_MARGIN: f64 = 0.05;

/// View placement: Web Mercator bounds mapped onto a pixel canvas.
#[derive(Debug, Clone, Copy)]
struct View {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
    width: u32,
    height: u32,
}

impl View {
    /// Pixel position of a Web Mercator coordinate (may fall off-canvas).
    fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        let px = (x - self.west) / (self.east - self.west) * self.width as f64;
        let py = (self.north - y) / (self.north - self.south) * self.height as f64;
        (px.floor() as i64, py.floor() as i64)
    }
}

/// Renders record sets to PNG files with magnitude-colored markers.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    /// Marker radius in pixels.
    pub point_radius: u32,
    /// Whether to draw the magnitude color bar.
    pub legend: bool,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            point_radius: 4,
            legend: true,
        }
    }
}

impl MapRenderer for PngRenderer {
    fn render(&self, set: &RecordSet, basemap: Option<&BasemapRaster>, out: &Path) -> Result<()> {
        let (mut canvas, view) = match basemap {
            Some(raster) => {
                let underlay = image::open(&raster.path)?.to_rgba8();
                let view = View {
                    west: raster.west,
                    south: raster.south,
                    east: raster.east,
                    north: raster.north,
                    width: underlay.width(),
                    height: underlay.height(),
                };
                (underlay, view)
            }
            None => blank_canvas(set)?,
        };

        let (min_mag, max_mag) = magnitude_range(set);
        for record in set.records() {
            let (px, py) = view.to_pixel(record.geometry.x(), record.geometry.y());
            let color = color_for(record.magnitude, min_mag, max_mag);
            draw_disk(&mut canvas, px, py, self.point_radius, color);
        }

        if self.legend {
            draw_legend(&mut canvas, min_mag, max_mag);
        }

        canvas.save(out)?;
        info!(rows = set.len(), path = %out.display(), "rendered map");
        Ok(())
    }
}

/// Blank white canvas sized to the record bounds plus a margin.
fn blank_canvas(set: &RecordSet) -> Result<(RgbaImage, View)> {
    let (w, s, e, n) = set.total_bounds().ok_or(RenderError::NothingToRender)?;
    let span_x = (e - w).max(f64::EPSILON);
    let span_y = (n - s).max(f64::EPSILON);
    let view = View {
        west: w - span_x * FALLBACK_MARGIN,
        east: e + span_x * FALLBACK_MARGIN,
        south: s - span_y * FALLBACK_MARGIN,
        north: n + span_y * FALLBACK_MARGIN,
        width: FALLBACK_WIDTH,
        height: ((FALLBACK_WIDTH as f64) * span_y / span_x).ceil().max(1.0) as u32,
    };
    let canvas = RgbaImage::from_pixel(view.width, view.height, Rgba([255, 255, 255, 255]));
    Ok((canvas, view))
}

fn magnitude_range(set: &RecordSet) -> (f64, f64) {
    let mut range = (f64::INFINITY, f64::NEG_INFINITY);
    for record in set.records() {
        range.0 = range.0.min(record.magnitude);
        range.1 = range.1.max(record.magnitude);
    }
    if range.0 > range.1 {
        (0.0, 1.0)
    } else {
        range
    }
}

/// Magnitude color ramp: blue through yellow to red.
fn color_for(magnitude: f64, min: f64, max: f64) -> Rgba<u8> {
    let span = (max - min).max(f64::EPSILON);
    let t = ((magnitude - min) / span).clamp(0.0, 1.0) as f32;

    let low = LinSrgb::new(0.13_f32, 0.28, 0.67);
    let mid = LinSrgb::new(0.99_f32, 0.91, 0.14);
    let high = LinSrgb::new(0.84_f32, 0.11, 0.11);
    let color = if t < 0.5 {
        low.mix(mid, t * 2.0)
    } else {
        mid.mix(high, (t - 0.5) * 2.0)
    };
    Rgba([
        (color.red * 255.0).round() as u8,
        (color.green * 255.0).round() as u8,
        (color.blue * 255.0).round() as u8,
        255,
    ])
}

/// Filled disk, clipped to the canvas.
fn draw_disk(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: u32, color: Rgba<u8>) {
    let r = radius as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Vertical color bar along the right edge, low magnitude at the bottom.
fn draw_legend(canvas: &mut RgbaImage, min_mag: f64, max_mag: f64) {
    let bar_width = 14u32.min(canvas.width());
    let bar_height = canvas.height() / 2;
    if bar_height == 0 {
        return;
    }
    let x0 = canvas.width() - bar_width;
    let y0 = canvas.height() / 4;

    for row in 0..bar_height {
        // Top row is the maximum.
        let t = 1.0 - row as f64 / (bar_height.saturating_sub(1).max(1)) as f64;
        let color = color_for(min_mag + t * (max_mag - min_mag), min_mag, max_mag);
        for col in 0..bar_width {
            canvas.put_pixel(x0 + col, y0 + row, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakemap_dataset::Crs;

    const SAMPLE: &str = "\
2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2
2021 FEB 15   14 30 59.1 40.7128 25.3047  100        5.8
";

    #[test]
    fn test_render_without_basemap() {
        let set = RecordSet::from_report(SAMPLE, Crs::WGS84)
            .unwrap()
            .reproject(Crs::WEB_MERCATOR)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("map.png");

        PngRenderer::default().render(&set, None, &out).unwrap();

        let rendered = image::open(&out).unwrap().to_rgba8();
        assert_eq!(rendered.width(), FALLBACK_WIDTH);
        assert!(rendered.height() > 0);
        // At least one non-white pixel: the markers were drawn.
        assert!(rendered.pixels().any(|p| p.0 != [255, 255, 255, 255]));
    }

    #[test]
    fn test_render_empty_set_without_basemap_fails() {
        let set = RecordSet::from_report("", Crs::WGS84).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("map.png");
        let err = PngRenderer::default().render(&set, None, &out).unwrap_err();
        assert!(matches!(err, RenderError::NothingToRender));
    }

    #[test]
    fn test_render_over_basemap_places_points() {
        let dir = tempfile::tempdir().unwrap();

        // Synthetic all-white basemap covering x,y in [0, 1000] meters.
        let basemap_path = dir.path().join("basemap.png");
        RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]))
            .save(&basemap_path)
            .unwrap();
        let raster = BasemapRaster {
            path: basemap_path,
            west: 0.0,
            south: 0.0,
            east: 1000.0,
            north: 1000.0,
        };

        // One record whose mercator position is the raster center; forge it
        // by building a set already tagged as Web Mercator.
        let text = "2021 JAN  1   00 38 24.3 500.0000 500.0000    8         1.2\n";
        let set = RecordSet::from_report(text, Crs::WEB_MERCATOR).unwrap();

        let out = dir.path().join("map.png");
        let renderer = PngRenderer {
            legend: false,
            ..PngRenderer::default()
        };
        renderer.render(&set, Some(&raster), &out).unwrap();

        let rendered = image::open(&out).unwrap().to_rgba8();
        assert_eq!((rendered.width(), rendered.height()), (100, 100));
        // Center pixel carries the marker color.
        assert_ne!(rendered.get_pixel(50, 50).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_color_ramp_endpoints() {
        let low = color_for(0.0, 0.0, 6.0);
        let high = color_for(6.0, 0.0, 6.0);
        // Low magnitudes are blue-ish, high ones red-ish.
        assert!(low.0[2] > low.0[0]);
        assert!(high.0[0] > high.0[2]);
    }

    #[test]
    fn test_view_pixel_mapping() {
        let view = View {
            west: 0.0,
            south: 0.0,
            east: 100.0,
            north: 200.0,
            width: 50,
            height: 100,
        };
        assert_eq!(view.to_pixel(0.0, 200.0), (0, 0));
        assert_eq!(view.to_pixel(50.0, 100.0), (25, 50));
    }
}
