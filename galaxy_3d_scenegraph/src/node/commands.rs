/// Command nodes: leaves that write into the command target

use std::sync::Arc;
use crate::error::Result;
use crate::render::{CommandList, Buffer, IndexType, ShaderStage};
use super::{Node, Visitor};

/// Leaf node that records operations into a command list
pub trait Command: Node {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()>;
}

/// Non-indexed draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub vertex_count: u32,
    pub first_vertex: u32,
}

impl Draw {
    pub fn new(vertex_count: u32, first_vertex: u32) -> Self {
        Self { vertex_count, first_vertex }
    }
}

impl Command for Draw {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.draw(self.vertex_count, self.first_vertex)
    }
}

/// Indexed draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawIndexed {
    pub index_count: u32,
    pub first_index: u32,
    pub vertex_offset: i32,
}

impl DrawIndexed {
    pub fn new(index_count: u32, first_index: u32, vertex_offset: i32) -> Self {
        Self { index_count, first_index, vertex_offset }
    }
}

impl Command for DrawIndexed {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.draw_indexed(self.index_count, self.first_index, self.vertex_offset)
    }
}

#[derive(Debug, Clone)]
pub struct BindVertexBuffer {
    pub buffer: Arc<dyn Buffer>,
    pub offset: u64,
}

impl BindVertexBuffer {
    pub fn new(buffer: Arc<dyn Buffer>, offset: u64) -> Self {
        Self { buffer, offset }
    }
}

impl Command for BindVertexBuffer {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.bind_vertex_buffer(&self.buffer, self.offset)
    }
}

#[derive(Debug, Clone)]
pub struct BindIndexBuffer {
    pub buffer: Arc<dyn Buffer>,
    pub offset: u64,
    pub index_type: IndexType,
}

impl BindIndexBuffer {
    pub fn new(buffer: Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Self {
        Self { buffer, offset, index_type }
    }
}

impl Command for BindIndexBuffer {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.bind_index_buffer(&self.buffer, self.offset, self.index_type)
    }
}

/// Raw push constant upload
#[derive(Debug, Clone)]
pub struct PushConstants {
    pub stages: Vec<ShaderStage>,
    pub offset: u32,
    pub data: Vec<u8>,
}

impl PushConstants {
    pub fn new(stages: Vec<ShaderStage>, offset: u32, data: Vec<u8>) -> Self {
        Self { stages, offset, data }
    }

    /// Build from any plain-old-data value
    pub fn from_value<T: bytemuck::Pod>(stages: Vec<ShaderStage>, offset: u32, value: &T) -> Self {
        Self::new(stages, offset, bytemuck::bytes_of(value).to_vec())
    }
}

impl Command for PushConstants {
    fn record(&self, commands: &mut dyn CommandList) -> Result<()> {
        commands.push_constants(&self.stages, self.offset, &self.data)
    }
}

macro_rules! impl_command_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Node for $ty {
                fn class_name(&self) -> &'static str {
                    stringify!($ty)
                }

                fn accept(&self, visitor: &mut dyn Visitor) {
                    visitor.apply_command(self);
                }
            }
        )*
    };
}

impl_command_node!(Draw, DrawIndexed, BindVertexBuffer, BindIndexBuffer, PushConstants);

/// Flat list of commands recorded in order
#[derive(Debug, Default)]
pub struct Commands {
    commands: Vec<Arc<dyn Command>>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    pub fn with(mut self, command: Arc<dyn Command>) -> Self {
        self.add(command);
        self
    }

    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Node for Commands {
    fn class_name(&self) -> &'static str {
        "Commands"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_commands(self);
    }
}
