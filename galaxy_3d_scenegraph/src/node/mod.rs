//! Scene graph nodes
//!
//! Nodes are immutable once built and shared through `NodeRef`
//! (`Arc<dyn Node>`): one node may appear under several parents. Parent
//! edges are owning, there are no back-references.
//!
//! Dispatch is double-dispatch through the `Visitor` trait: every node
//! kind implements `Node::accept` by calling the matching `apply_*` method
//! on the visitor. A node kind unknown to a visitor calls
//! `Visitor::apply_node`, which every visitor must handle, so new kinds
//! can be added without touching existing handlers.

mod group;
mod cull;
mod lod;
mod paged_lod;
mod transform;
mod state_group;
mod commands;
mod view;

pub use group::{Group, QuadGroup};
pub use cull::{CullGroup, CullNode};
pub use lod::{LOD, LodBand, LodBoundary};
pub use paged_lod::PagedLOD;
pub use transform::MatrixTransform;
pub use state_group::{
    StateGroup, StateCommand, BindGraphicsPipeline, BindBindingGroup,
    PIPELINE_SLOT, BINDING_GROUP_SLOT,
};
pub use commands::{
    Command, Commands, Draw, DrawIndexed, BindVertexBuffer, BindIndexBuffer, PushConstants,
};
pub use view::{View, ViewMask};

use std::fmt;
use std::sync::Arc;

/// Shared handle to a scene graph node
pub type NodeRef = Arc<dyn Node>;

/// Scene graph element
pub trait Node: Send + Sync + fmt::Debug {
    /// Short kind name used in logs
    fn class_name(&self) -> &'static str;

    /// Dispatch to the visitor method matching this node's kind
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// Per-kind entry points of a scene graph traversal
///
/// Every method except `apply_node` has a default. Container defaults
/// visit children in order, leaf defaults do nothing, so a visitor only
/// overrides the kinds it cares about.
pub trait Visitor {
    /// Fallback for node kinds this visitor has no handler for
    fn apply_node(&mut self, node: &dyn Node);

    fn apply_group(&mut self, group: &Group) {
        group.traverse(self.as_visitor());
    }

    fn apply_quad_group(&mut self, group: &QuadGroup) {
        group.traverse(self.as_visitor());
    }

    fn apply_cull_group(&mut self, group: &CullGroup) {
        group.traverse(self.as_visitor());
    }

    fn apply_cull_node(&mut self, node: &CullNode) {
        node.traverse(self.as_visitor());
    }

    fn apply_lod(&mut self, lod: &LOD) {
        lod.traverse(self.as_visitor());
    }

    fn apply_paged_lod(&mut self, paged: &PagedLOD) {
        paged.traverse(self.as_visitor());
    }

    fn apply_matrix_transform(&mut self, transform: &MatrixTransform) {
        transform.traverse(self.as_visitor());
    }

    fn apply_state_group(&mut self, group: &StateGroup) {
        group.traverse(self.as_visitor());
    }

    fn apply_view(&mut self, view: &View) {
        view.traverse(self.as_visitor());
    }

    fn apply_commands(&mut self, _commands: &Commands) {}

    fn apply_command(&mut self, _command: &dyn Command) {}

    /// Upcast used by the default container handlers
    fn as_visitor(&mut self) -> &mut dyn Visitor;
}

/// Visit every child in order
pub(crate) fn traverse_children(children: &[NodeRef], visitor: &mut dyn Visitor) {
    for child in children {
        child.accept(visitor);
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
