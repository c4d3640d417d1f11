//! Culling module - bounding volumes and the frustum culler.

mod bounding_volume;
mod culler;

pub use bounding_volume::{AABB, BoundingSphere, BoundingVolume};
pub use culler::Culler;
