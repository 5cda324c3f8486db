/// Strided raster sampling into scene-space points
use crate::cloud::{Point, PointCloud};
use crate::color;
use crate::config::SamplingConfig;
use crate::raster::Raster;
use constants::WORLD_SCALE;
use rayon::prelude::*;

/// Convert a raster into a point cloud with the given parameters.
/// Deterministic: identical raster and config always produce the identical
/// point sequence, in row-major scan order. Degenerate rasters (zero
/// dimensions, short buffer, everything below the alpha threshold) yield a
/// valid empty cloud.
pub fn sample(raster: &Raster, config: &SamplingConfig) -> PointCloud {
    if !raster.is_well_formed() {
        return PointCloud::default();
    }

    let step = config.effective_step();
    // Integer centre offsets keep a 1x1 raster's single point at the origin
    let offset_x = (raster.width() / 2) as f32;
    let offset_y = (raster.height() / 2) as f32;

    // Rows fan out across threads; collecting by row start preserves the
    // serial scan order exactly
    let row_starts: Vec<u32> = (0..raster.height()).step_by(step as usize).collect();
    let rows: Vec<Vec<Point>> = row_starts
        .par_iter()
        .map(|&y| sample_row(raster, config, y, step, offset_x, offset_y))
        .collect();

    PointCloud::new(rows.into_iter().flatten().collect())
}

/// Scan one row at the effective stride, left to right
fn sample_row(
    raster: &Raster,
    config: &SamplingConfig,
    y: u32,
    step: u32,
    offset_x: f32,
    offset_y: f32,
) -> Vec<Point> {
    let spacing = config.particle_size * WORLD_SCALE;
    let mut points = Vec::new();

    for x in (0..raster.width()).step_by(step as usize) {
        let (r, g, b, a) = raster.pixel(x, y);
        if a >= config.alpha_threshold {
            // Flat luma drives depth; the colour transform uses weighted luma
            let luma = (r as f32 + g as f32 + b as f32) / 765.0;
            points.push(Point {
                position: [
                    (x as f32 - offset_x) * spacing,
                    // Raster rows grow downward, scene Y grows upward
                    -(y as f32 - offset_y) * spacing,
                    luma * config.z_extrusion * WORLD_SCALE,
                ],
                color: color::transform([r, g, b], config.color_mode, config.brightness, config.tint),
            });
        }
    }

    points
}
