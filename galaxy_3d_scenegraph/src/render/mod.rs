//! Render module - the command-target seam of the record traversal.
//!
//! Everything here is an interface boundary: the traversal writes into a
//! `CommandList` and hands it opaque GPU objects (`Pipeline`,
//! `BindingGroup`, `Buffer`) that backends implement.

mod command_list;
mod resources;

pub use command_list::{CommandList, Viewport, Rect2D};
pub use resources::{Pipeline, BindingGroup, Buffer, ShaderStage, IndexType};

#[cfg(test)]
pub(crate) mod mock_command_list;
