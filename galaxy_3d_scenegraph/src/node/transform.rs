/// Local transform node

use glam::Mat4;
use super::{Node, NodeRef, Visitor, traverse_children};

/// Applies a local matrix to all children
#[derive(Debug)]
pub struct MatrixTransform {
    matrix: Mat4,
    children: Vec<NodeRef>,
}

impl MatrixTransform {
    pub fn new(matrix: Mat4) -> Self {
        Self {
            matrix,
            children: Vec::new(),
        }
    }

    pub fn with_children(matrix: Mat4, children: Vec<NodeRef>) -> Self {
        Self { matrix, children }
    }

    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        traverse_children(&self.children, visitor);
    }
}

impl Node for MatrixTransform {
    fn class_name(&self) -> &'static str {
        "MatrixTransform"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_matrix_transform(self);
    }
}
