/// Raster image to volumetric pixel cloud conversion pipeline
pub mod cloud;
pub mod color;
pub mod config;
pub mod ply;
pub mod raster;
pub mod render;
pub mod sampler;
pub mod store;
pub mod worker;

pub use cloud::{CloudBounds, Point, PointCloud};
pub use config::{ColorMode, ConfigError, PointShape, SamplingConfig};
pub use raster::Raster;
pub use render::RenderAdapter;
pub use sampler::sample;
pub use store::{CloudStore, SampleTicket};
pub use worker::SampleWorker;
