/// View-frustum culling of bounding volumes.
///
/// The Culler is stateless: every test is a pure function of its inputs,
/// so independent traversals on different threads can call it freely.
///
/// Instead of transforming each bounding volume into clip space, the view
/// frustum is transformed once into the node's local space (see
/// `Frustum::transformed`) and every volume below that transform is tested
/// directly against the local planes.

use glam::Mat4;
use crate::camera::Frustum;
use super::bounding_volume::BoundingVolume;

/// Frustum culler for bounding volumes.
pub struct Culler;

impl Culler {
    /// Test a local-space volume against a view frustum.
    ///
    /// * `volume` - Bounding volume in the node's local space
    /// * `composed` - projection * view * model matrix in effect at the node
    /// * `view_frustum` - Frustum in clip space (usually `Frustum::clip_space()`)
    ///
    /// Returns `false` only when a single plane fully separates the volume.
    pub fn is_visible(volume: &BoundingVolume, composed: &Mat4, view_frustum: &Frustum) -> bool {
        Self::is_visible_local(volume, &view_frustum.transformed(composed))
    }

    /// Test a volume against a frustum already expressed in the volume's space.
    ///
    /// Malformed volumes are accepted: culling must never hide geometry
    /// because its bound was authored badly.
    pub fn is_visible_local(volume: &BoundingVolume, local_frustum: &Frustum) -> bool {
        if !volume.is_valid() {
            return true;
        }

        match volume {
            BoundingVolume::Sphere(sphere) => local_frustum.intersects_sphere(sphere),
            BoundingVolume::Box(aabb) => local_frustum.intersects_aabb(aabb),
        }
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
