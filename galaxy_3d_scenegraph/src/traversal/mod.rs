//! Traversal module
//!
//! The record traversal and the state it carries while descending a scene
//! graph: matrix stacks, per-slot state stacks, frusta and viewports.

mod transform_stack;
mod state_stack;
mod state;
mod frame;
mod record_traversal;

pub use transform_stack::TransformStack;
pub use state_stack::StateStack;
pub use state::{State, StackDepths, ViewportState, PROJECTION_OFFSET, MODELVIEW_OFFSET};
pub use frame::{FrameStamp, FrameContext};
pub use record_traversal::{RecordTraversal, RecordConfig, LodPolicy, RecordStats};
pub use crate::node::LodBoundary;
