/// Mock command target for unit tests
///
/// Records every call as a readable string so tests can compare exact
/// command sequences.

#[cfg(test)]
use std::fmt;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use super::command_list::{CommandList, Viewport, Rect2D};
#[cfg(test)]
use super::resources::{Pipeline, BindingGroup, Buffer, IndexType, ShaderStage};

// ===== MOCK PIPELINE =====

#[cfg(test)]
pub struct MockPipeline {
    pub name: String,
}

#[cfg(test)]
impl MockPipeline {
    pub fn new(name: &str) -> Arc<dyn Pipeline> {
        Arc::new(Self { name: name.to_string() })
    }
}

#[cfg(test)]
impl fmt::Debug for MockPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
impl Pipeline for MockPipeline {}

// ===== MOCK BINDING GROUP =====

#[cfg(test)]
#[derive(Debug)]
pub struct MockBindingGroup {
    pub set_index: u32,
}

#[cfg(test)]
impl MockBindingGroup {
    pub fn new(set_index: u32) -> Arc<dyn BindingGroup> {
        Arc::new(Self { set_index })
    }
}

#[cfg(test)]
impl BindingGroup for MockBindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}

// ===== MOCK BUFFER =====

#[cfg(test)]
#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
}

#[cfg(test)]
impl MockBuffer {
    pub fn new(size: u64) -> Arc<dyn Buffer> {
        Arc::new(Self { size })
    }
}

#[cfg(test)]
impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}

// ===== MOCK COMMAND LIST =====

#[cfg(test)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    /// (offset, bytes) of every push_constants call
    pub push_constant_data: Vec<(u32, Vec<u8>)>,
    /// When set, draw calls return a BackendError
    pub fail_draws: bool,
}

#[cfg(test)]
impl MockCommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            push_constant_data: Vec::new(),
            fail_draws: false,
        }
    }

    /// Recorded commands excluding push constants
    pub fn without_push_constants(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter(|c| !c.starts_with("push_constants"))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl CommandList for MockCommandList {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(format!("set_viewport({}x{})", viewport.width, viewport.height));
        Ok(())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.commands.push(format!("set_scissor({}x{})", scissor.width, scissor.height));
        Ok(())
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push(format!("bind_pipeline({:?})", pipeline));
        Ok(())
    }

    fn bind_binding_group(
        &mut self,
        _pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        _binding_group: &Arc<dyn BindingGroup>,
    ) -> Result<()> {
        self.commands.push(format!("bind_binding_group({})", set_index));
        Ok(())
    }

    fn push_constants(&mut self, _stages: &[ShaderStage], offset: u32, data: &[u8]) -> Result<()> {
        self.commands.push(format!("push_constants({})", offset));
        self.push_constant_data.push((offset, data.to_vec()));
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, _buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()> {
        self.commands.push(format!("bind_vertex_buffer({})", offset));
        Ok(())
    }

    fn bind_index_buffer(&mut self, _buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()> {
        self.commands.push(format!("bind_index_buffer({}, {:?})", offset, index_type));
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        if self.fail_draws {
            return Err(crate::error::Error::BackendError("mock draw failure".to_string()));
        }
        self.commands.push(format!("draw({}, {})", vertex_count, first_vertex));
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()> {
        if self.fail_draws {
            return Err(crate::error::Error::BackendError("mock draw failure".to_string()));
        }
        self.commands.push(format!("draw_indexed({}, {}, {})", index_count, first_index, vertex_offset));
        Ok(())
    }
}
