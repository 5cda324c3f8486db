/// Point cloud storage and scene-space bounds tracking
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One sampled point: scene-space position plus transformed colour.
/// Colour channels may exceed 1.0; clamping happens at export/render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Ordered point sequence produced by one sampler pass.
/// The order is the raster scan order and only matters for reproducible
/// export; rendering treats the set as unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Calculate scene-space bounds over all points in parallel chunks
    pub fn bounds(&self) -> CloudBounds {
        self.points
            .par_chunks(25_000)
            .map(|chunk| {
                let mut local_bounds = CloudBounds::new();
                for point in chunk {
                    let [x, y, z] = point.position;
                    local_bounds.update(x, y, z);
                }
                local_bounds
            })
            .reduce_with(|mut a, b| {
                a.merge(&b);
                a
            })
            .unwrap_or_else(CloudBounds::new)
    }
}

/// Scene-space coordinate bounds of a sampled cloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl CloudBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            min_y: f32::INFINITY,
            max_y: f32::NEG_INFINITY,
            min_z: f32::INFINITY,
            max_z: f32::NEG_INFINITY,
        }
    }

    /// Update bounds with a new point
    pub fn update(&mut self, x: f32, y: f32, z: f32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    /// Fold another bounds into this one
    pub fn merge(&mut self, other: &CloudBounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
        self.min_z = self.min_z.min(other.min_z);
        self.max_z = self.max_z.max(other.max_z);
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.max_x + self.min_x) * 0.5,
            (self.max_y + self.min_y) * 0.5,
            (self.max_z + self.min_z) * 0.5,
        ]
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        ]
    }
}

impl Default for CloudBounds {
    fn default() -> Self {
        Self::new()
    }
}
