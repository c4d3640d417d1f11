/// Bounded nodes the traversal may skip when outside the view

use crate::culling::BoundingVolume;
use super::{Node, NodeRef, Visitor, traverse_children};

/// Group with a bounding volume enclosing all of its children
#[derive(Debug)]
pub struct CullGroup {
    bound: BoundingVolume,
    children: Vec<NodeRef>,
}

impl CullGroup {
    pub fn new(bound: impl Into<BoundingVolume>) -> Self {
        Self {
            bound: bound.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(bound: impl Into<BoundingVolume>, children: Vec<NodeRef>) -> Self {
        Self {
            bound: bound.into(),
            children,
        }
    }

    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    /// Bounding volume in the group's local space
    pub fn bound(&self) -> &BoundingVolume {
        &self.bound
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        traverse_children(&self.children, visitor);
    }
}

impl Node for CullGroup {
    fn class_name(&self) -> &'static str {
        "CullGroup"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_cull_group(self);
    }
}

/// Single bounded child
#[derive(Debug)]
pub struct CullNode {
    bound: BoundingVolume,
    child: NodeRef,
}

impl CullNode {
    pub fn new(bound: impl Into<BoundingVolume>, child: NodeRef) -> Self {
        Self {
            bound: bound.into(),
            child,
        }
    }

    pub fn bound(&self) -> &BoundingVolume {
        &self.bound
    }

    pub fn child(&self) -> &NodeRef {
        &self.child
    }

    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        self.child.accept(visitor);
    }
}

impl Node for CullNode {
    fn class_name(&self) -> &'static str {
        "CullNode"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_cull_node(self);
    }
}
