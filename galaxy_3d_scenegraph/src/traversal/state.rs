/// Traversal state: matrix stacks, culling frusta, bindings and viewports
///
/// Everything that changes while descending is recorded lazily: pushes
/// only mark state dirty and `record` emits the dirty parts right before a
/// command needs them.

use glam::Mat4;
use crate::camera::{Camera, Frustum};
use crate::error::Result;
use crate::render::{CommandList, Viewport, Rect2D, ShaderStage};
use super::state_stack::StateStack;
use super::transform_stack::TransformStack;

/// Push constant offset of the projection matrix
pub const PROJECTION_OFFSET: u32 = 0;

/// Push constant offset of the model-view matrix
pub const MODELVIEW_OFFSET: u32 = 64;

const MATRIX_STAGES: [ShaderStage; 1] = [ShaderStage::Vertex];

/// Viewport and scissor applied by a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub viewport: Viewport,
    pub scissor: Option<Rect2D>,
}

/// Depth of every traversal stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackDepths {
    pub projection: usize,
    pub modelview: usize,
    pub frustums: usize,
    pub state_bindings: usize,
    pub viewports: usize,
}

/// Working state of one traversal
#[derive(Debug)]
pub struct State {
    projection: TransformStack,
    modelview: TransformStack,
    /// View frustum in the local space of each transform scope
    frustums: Vec<Frustum>,
    view_frustum: Frustum,
    state_stack: StateStack,
    viewports: Vec<Option<ViewportState>>,
    matrices_dirty: bool,
    viewport_dirty: bool,
}

impl State {
    pub fn new(max_slot: u32) -> Self {
        let view_frustum = Frustum::clip_space();
        Self {
            projection: TransformStack::new(),
            modelview: TransformStack::new(),
            frustums: vec![view_frustum],
            view_frustum,
            state_stack: StateStack::new(max_slot),
            viewports: Vec::new(),
            matrices_dirty: true,
            viewport_dirty: false,
        }
    }

    /// Reset both matrix stacks to a new camera
    pub fn set_projection_and_view(&mut self, projection: Mat4, view: Mat4) {
        self.projection.reset(projection);
        self.modelview.reset(view);
        self.frustums.clear();
        self.frustums.push(self.view_frustum.transformed(&(projection * view)));
        self.matrices_dirty = true;
    }

    pub fn projection(&self) -> Mat4 {
        self.projection.current()
    }

    pub fn modelview(&self) -> Mat4 {
        self.modelview.current()
    }

    /// projection * modelview
    pub fn composed(&self) -> Mat4 {
        self.projection.current() * self.modelview.current()
    }

    /// View frustum in the current local space
    pub fn local_frustum(&self) -> &Frustum {
        // The base frustum is only replaced, never popped.
        &self.frustums[self.frustums.len() - 1]
    }

    pub fn state_stack(&self) -> &StateStack {
        &self.state_stack
    }

    pub fn state_stack_mut(&mut self) -> &mut StateStack {
        &mut self.state_stack
    }

    fn push_local_frustum(&mut self) {
        let frustum = self.view_frustum.transformed(&self.composed());
        self.frustums.push(frustum);
    }

    fn pop_local_frustum(&mut self) {
        if self.frustums.len() > 1 {
            self.frustums.pop();
        }
    }

    /// Enter a local transform scope
    pub fn push_transform(&mut self, local: &Mat4) {
        self.modelview.push(local);
        self.push_local_frustum();
        self.matrices_dirty = true;
    }

    pub fn pop_transform(&mut self) {
        self.modelview.pop();
        self.pop_local_frustum();
        self.matrices_dirty = true;
    }

    /// Enter a camera scope: projection and view are replaced, not composed
    ///
    /// A camera without viewport keeps the enclosing one.
    pub fn push_view(&mut self, camera: &Camera) {
        self.projection.push_absolute(*camera.projection_matrix());
        self.modelview.push_absolute(*camera.view_matrix());
        self.push_local_frustum();

        let viewport = match camera.viewport() {
            Some(viewport) => Some(ViewportState {
                viewport: *viewport,
                scissor: camera.effective_scissor(),
            }),
            None => self.viewports.last().copied().flatten(),
        };
        self.viewports.push(viewport);

        self.matrices_dirty = true;
        self.viewport_dirty = true;
    }

    pub fn pop_view(&mut self) {
        self.projection.pop();
        self.modelview.pop();
        self.pop_local_frustum();
        self.viewports.pop();
        self.matrices_dirty = true;
        self.viewport_dirty = true;
    }

    pub fn current_viewport(&self) -> Option<&ViewportState> {
        self.viewports.last().and_then(Option::as_ref)
    }

    /// Force everything to be recorded again (new command target)
    pub fn mark_all_dirty(&mut self) {
        self.state_stack.mark_all_dirty();
        self.matrices_dirty = true;
        self.viewport_dirty = true;
    }

    /// Record all dirty state: viewport, slot bindings, then matrices
    pub fn record(&mut self, commands: &mut dyn CommandList) -> Result<()> {
        if self.viewport_dirty {
            if let Some(state) = self.current_viewport().copied() {
                commands.set_viewport(state.viewport)?;
                if let Some(scissor) = state.scissor {
                    commands.set_scissor(scissor)?;
                }
            }
            self.viewport_dirty = false;
        }

        self.state_stack.record(commands)?;

        if self.matrices_dirty {
            let projection = self.projection.current();
            let modelview = self.modelview.current();
            commands.push_constants(&MATRIX_STAGES, PROJECTION_OFFSET, bytemuck::bytes_of(&projection))?;
            commands.push_constants(&MATRIX_STAGES, MODELVIEW_OFFSET, bytemuck::bytes_of(&modelview))?;
            self.matrices_dirty = false;
        }
        Ok(())
    }

    pub fn depths(&self) -> StackDepths {
        StackDepths {
            projection: self.projection.depth(),
            modelview: self.modelview.depth(),
            frustums: self.frustums.len() - 1,
            state_bindings: self.state_stack.total_depth(),
            viewports: self.viewports.len(),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
