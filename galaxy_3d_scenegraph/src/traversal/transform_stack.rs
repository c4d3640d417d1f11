/// TransformStack - composed matrices for nested transform scopes

use glam::Mat4;

/// Stack of composed matrices with a permanent base entry
///
/// `current()` is always defined: the base entry is never popped.
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_base(Mat4::IDENTITY)
    }

    pub fn with_base(base: Mat4) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(base);
        Self { stack }
    }

    /// Replace the base entry and drop every pushed entry
    pub fn reset(&mut self, base: Mat4) {
        self.stack.clear();
        self.stack.push(base);
    }

    /// Push `current() * local`
    pub fn push(&mut self, local: &Mat4) {
        let composed = self.current() * *local;
        self.stack.push(composed);
    }

    /// Push `matrix` as is, ignoring the current top
    pub fn push_absolute(&mut self, matrix: Mat4) {
        self.stack.push(matrix);
    }

    /// Restore the previous top
    ///
    /// Popping the base entry is a contract violation: it asserts in debug
    /// builds and is ignored in release builds.
    pub fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "TransformStack::pop without matching push");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of pushed entries above the base
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "transform_stack_tests.rs"]
mod tests;
