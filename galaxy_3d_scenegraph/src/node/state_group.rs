/// State-binding nodes
///
/// A `StateGroup` carries state commands, each bound to a numbered slot.
/// While the group's subtree is visited, its commands shadow any outer
/// binding at the same slot. Slots nest independently, so a group that
/// only binds a material does not disturb the pipeline bound above it.

use std::fmt;
use std::sync::Arc;
use crate::error::Result;
use crate::render::{CommandList, Pipeline, BindingGroup};
use super::{Node, NodeRef, Visitor, traverse_children};

/// Slot of graphics pipeline bindings
pub const PIPELINE_SLOT: u32 = 0;

/// Slot of binding group (descriptor set) bindings
pub const BINDING_GROUP_SLOT: u32 = 1;

/// A state binding recorded lazily before the next draw
pub trait StateCommand: Send + Sync + fmt::Debug {
    /// Slot this binding occupies
    fn slot(&self) -> u32;

    /// Record the binding into `commands`
    fn record(&self, commands: &mut dyn CommandList) -> Result<()>;
}

/// Binds a graphics pipeline
#[derive(Debug)]
pub struct BindGraphicsPipeline {
    pipeline: Arc<dyn Pipeline>,
    slot: u32,
}

impl BindGraphicsPipeline {
    pub fn new(pipeline: Arc<dyn Pipeline>) -> Self {
        Self {
            pipeline,
            slot: PIPELINE_SLOT,
        }
    }

    /// Place the binding on a non-default slot
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    pub fn pipeline(&self) -> &Arc<dyn Pipeline> {
        &self.pipeline
    }
}

impl StateCommand for BindGraphicsPipeline {
    fn slot(&self) -> u32 {
        self.slot
    }

    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.bind_pipeline(&self.pipeline)
    }
}

/// Binds a binding group against a pipeline layout
#[derive(Debug)]
pub struct BindBindingGroup {
    pipeline: Arc<dyn Pipeline>,
    binding_group: Arc<dyn BindingGroup>,
    slot: u32,
}

impl BindBindingGroup {
    pub fn new(pipeline: Arc<dyn Pipeline>, binding_group: Arc<dyn BindingGroup>) -> Self {
        Self {
            pipeline,
            binding_group,
            slot: BINDING_GROUP_SLOT,
        }
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    pub fn binding_group(&self) -> &Arc<dyn BindingGroup> {
        &self.binding_group
    }
}

impl StateCommand for BindBindingGroup {
    fn slot(&self) -> u32 {
        self.slot
    }

    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.bind_binding_group(
            &self.pipeline,
            self.binding_group.set_index(),
            &self.binding_group,
        )
    }
}

/// Group whose subtree is rendered with additional state bindings
#[derive(Debug, Default)]
pub struct StateGroup {
    state_commands: Vec<Arc<dyn StateCommand>>,
    children: Vec<NodeRef>,
}

impl StateGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state command; later commands on the same slot shadow earlier ones
    pub fn add_state_command(&mut self, command: Arc<dyn StateCommand>) {
        self.state_commands.push(command);
    }

    pub fn with_state_command(mut self, command: Arc<dyn StateCommand>) -> Self {
        self.add_state_command(command);
        self
    }

    pub fn add_child(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: NodeRef) -> Self {
        self.add_child(child);
        self
    }

    pub fn state_commands(&self) -> &[Arc<dyn StateCommand>] {
        &self.state_commands
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        traverse_children(&self.children, visitor);
    }
}

impl Node for StateGroup {
    fn class_name(&self) -> &'static str {
        "StateGroup"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_state_group(self);
    }
}
