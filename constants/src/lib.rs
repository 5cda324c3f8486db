/// Shared tuning values for the pixel cloud pipeline

/// World-space scale applied to sampled positions and depth so clouds from
/// typical rasters land inside a conventional viewing volume
pub const WORLD_SCALE: f32 = 0.02;

/// Largest raster edge the sampler is fed directly; the image loader
/// downsamples anything bigger before conversion
pub const MAX_RASTER_EDGE: u32 = 512;

/// Default sampling stride in source pixels
pub const DEFAULT_STEP: f32 = 2.0;

/// Default geometric spacing / rendered point size multiplier
pub const DEFAULT_PARTICLE_SIZE: f32 = 1.0;

/// Default depth range mapped from pixel luminance
pub const DEFAULT_Z_EXTRUSION: f32 = 5.0;

/// Default minimum alpha for a pixel to produce a point
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 20;

/// Default post-transform colour gain
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;
