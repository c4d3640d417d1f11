/// Bounding volumes attached to cullable nodes.
///
/// Purely descriptive geometry in the node's local space. Node authors
/// compute and assign them; the traversal only reads them.

use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-Aligned Bounding Box in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create an AABB from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Centre of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// A box is valid when every component of `min` is <= `max` and finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Smallest sphere enclosing this box
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), (self.max - self.min).length() * 0.5)
    }
}

// ===== SPHERE =====

/// Bounding sphere in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Centre of the sphere
    pub center: Vec3,
    /// Radius; negative or non-finite radii mark an invalid sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a new bounding sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// A sphere is valid when its centre is finite and its radius finite and >= 0
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }
}

// ===== VOLUME =====

/// Bounding volume attached to `CullGroup`, `CullNode`, `LOD` and `PagedLOD`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    /// Sphere bound
    Sphere(BoundingSphere),
    /// Box bound
    Box(AABB),
}

impl BoundingVolume {
    /// Whether the wrapped shape is well-formed
    pub fn is_valid(&self) -> bool {
        match self {
            BoundingVolume::Sphere(sphere) => sphere.is_valid(),
            BoundingVolume::Box(aabb) => aabb.is_valid(),
        }
    }

    /// Centre of the wrapped shape
    pub fn center(&self) -> Vec3 {
        match self {
            BoundingVolume::Sphere(sphere) => sphere.center,
            BoundingVolume::Box(aabb) => aabb.center(),
        }
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        BoundingVolume::Sphere(sphere)
    }
}

impl From<AABB> for BoundingVolume {
    fn from(aabb: AABB) -> Self {
        BoundingVolume::Box(aabb)
    }
}

#[cfg(test)]
#[path = "bounding_volume_tests.rs"]
mod tests;
