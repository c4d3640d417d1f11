//! Camera module - low-level camera and frustum.
//!
//! Provides passive data containers for the record traversal.
//! The scene graph does NOT manage cameras: a `View` node owns one,
//! and the caller drives its matrices.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
