/// Camera - low-level passive data container.
///
/// The Camera computes nothing. The caller is responsible for computing
/// and setting the view matrix, projection matrix, viewport and scissor.
/// A `View` node carries one Camera and establishes it as the traversal's
/// projection/view context for its subgraph.

use glam::Mat4;
use crate::render::{Viewport, Rect2D};

/// Low-level camera. A passive data container that computes nothing.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Option<Viewport>,
    scissor: Option<Rect2D>,
}

impl Camera {
    /// Create a camera from view and projection matrices.
    ///
    /// Viewport and scissor default to `None` (inherit the outer context).
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            viewport: None,
            scissor: None,
        }
    }

    /// Builder-style viewport assignment.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Viewport, if set.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Scissor rectangle, if set.
    pub fn scissor(&self) -> Option<&Rect2D> {
        self.scissor.as_ref()
    }

    /// Effective scissor: explicit scissor, else viewport bounds, else `None`.
    pub fn effective_scissor(&self) -> Option<Rect2D> {
        self.scissor.or_else(|| {
            self.viewport.map(|viewport| Rect2D {
                x: viewport.x as i32,
                y: viewport.y as i32,
                width: viewport.width as u32,
                height: viewport.height as u32,
            })
        })
    }

    // ===== SETTERS (store only) =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the viewport. `None` inherits the outer context.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    /// Set the scissor rectangle. `None` means same as viewport.
    pub fn set_scissor(&mut self, scissor: Option<Rect2D>) {
        self.scissor = scissor;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
