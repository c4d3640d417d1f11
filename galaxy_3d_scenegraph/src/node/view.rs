/// View node: a camera-scoped sub-context

use bitflags::bitflags;
use crate::camera::Camera;
use super::{Node, NodeRef, Visitor, traverse_children};

bitflags! {
    /// Selects which traversals render a view
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewMask: u32 {
        const MAIN = 1 << 0;
        const SHADOW = 1 << 1;
        const REFLECTION = 1 << 2;
        const OVERLAY = 1 << 3;
        const ALL = !0;
    }
}

impl Default for ViewMask {
    fn default() -> Self {
        ViewMask::ALL
    }
}

/// Subgraph rendered from its own camera
///
/// Entering a view replaces the projection and view matrices (they are not
/// composed with the outer ones) and applies the camera viewport, if any.
#[derive(Debug)]
pub struct View {
    camera: Camera,
    mask: ViewMask,
    children: Vec<NodeRef>,
}

impl View {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            mask: ViewMask::ALL,
            children: Vec::new(),
        }
    }

    pub fn with_mask(mut self, mask: ViewMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_child(mut self, child: NodeRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mask(&self) -> ViewMask {
        self.mask
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        traverse_children(&self.children, visitor);
    }
}

impl Node for View {
    fn class_name(&self) -> &'static str {
        "View"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_view(self);
    }
}
