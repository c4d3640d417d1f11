/// Grouping nodes: Group and QuadGroup

use crate::engine_bail;
use crate::error::Result;
use super::{Node, NodeRef, Visitor, traverse_children};

/// Ordered list of children, visited without culling
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<NodeRef>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<NodeRef>) -> Self {
        Self { children }
    }

    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    /// Visit every child in insertion order
    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        traverse_children(&self.children, visitor);
    }
}

impl Node for Group {
    fn class_name(&self) -> &'static str {
        "Group"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_group(self);
    }
}

/// Group with exactly four optional children (quadtree tiles)
#[derive(Debug, Default)]
pub struct QuadGroup {
    children: [Option<NodeRef>; 4],
}

impl QuadGroup {
    pub fn new(children: [Option<NodeRef>; 4]) -> Self {
        Self { children }
    }

    /// Replace one quadrant (`index` in `0..4`)
    pub fn set_child(&mut self, index: usize, child: Option<NodeRef>) -> Result<()> {
        let Some(slot) = self.children.get_mut(index) else {
            engine_bail!("galaxy3d::QuadGroup", "Quadrant index {} out of range (4 quadrants)", index);
        };
        *slot = child;
        Ok(())
    }

    pub fn children(&self) -> &[Option<NodeRef>; 4] {
        &self.children
    }

    /// Visit the present quadrants in order
    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        for child in self.children.iter().flatten() {
            child.accept(visitor);
        }
    }
}

impl Node for QuadGroup {
    fn class_name(&self) -> &'static str {
        "QuadGroup"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_quad_group(self);
    }
}
