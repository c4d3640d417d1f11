/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Clip space follows glam's `*_rh` projections: x, y in [-w, w], z in [0, w].
/// A clip-space frustum transformed by a projection * model-view matrix
/// yields the same frustum expressed in the model's local space, which is
/// how the record traversal culls without transforming bounding volumes.

use glam::{Mat4, Vec3, Vec4};
use crate::culling::{AABB, BoundingSphere};

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// The canonical clip-space frustum (the view volume before any transform).
    pub fn clip_space() -> Self {
        Self {
            planes: [
                Vec4::new(1.0, 0.0, 0.0, 1.0),  // x >= -w
                Vec4::new(-1.0, 0.0, 0.0, 1.0), // x <= w
                Vec4::new(0.0, 1.0, 0.0, 1.0),  // y >= -w
                Vec4::new(0.0, -1.0, 0.0, 1.0), // y <= w
                Vec4::new(0.0, 0.0, 1.0, 0.0),  // z >= 0
                Vec4::new(0.0, 0.0, -1.0, 1.0), // z <= w
            ],
        }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Equivalent to the Gribb & Hartmann row extraction for a [0, 1] depth range.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        Self::clip_space().transformed(vp)
    }

    /// Express this frustum in the space that `matrix` maps into this frustum's space.
    ///
    /// For a point `p`, `plane · (matrix * p) == (matrixᵀ * plane) · p`, so each
    /// plane is multiplied by the transposed matrix, then renormalized so that
    /// plane distances are measured in the new space's units.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let transpose = matrix.transpose();
        let mut planes = self.planes;

        for plane in &mut planes {
            *plane = transpose * *plane;
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Test if a bounding sphere intersects this frustum.
    ///
    /// Returns `false` as soon as one plane has the whole sphere on its
    /// outer side. Conservative: may accept invisible spheres near corners,
    /// never rejects a visible one.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        for plane in &self.planes {
            let distance = plane.truncate().dot(sphere.center) + plane.w;
            if distance < -sphere.radius {
                return false;
            }
        }

        true
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::clip_space()
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
