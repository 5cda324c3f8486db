/// Render adapter contract for external instanced renderers
use crate::cloud::PointCloud;
use crate::config::PointShape;
use std::sync::Arc;

/// Seam between the core and whatever draws the cloud.
///
/// An implementation instances exactly one solid primitive per point, at the
/// point's position and colour. Presenting a new snapshot fully supersedes
/// the previous one: no instance from an older cloud may remain visible.
/// The core ships no implementation; renderers live outside this workspace.
pub trait RenderAdapter {
    /// Present a new cloud snapshot, one `shape` instance per point scaled
    /// by `point_scale`
    fn replace_cloud(&mut self, cloud: Arc<PointCloud>, shape: PointShape, point_scale: f32);

    /// Remove every instance; the viewport shows no cloud afterwards
    fn clear(&mut self);
}
