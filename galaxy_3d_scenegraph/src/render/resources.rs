/// Opaque GPU objects referenced by recorded commands.
///
/// Backends create and own the real objects; the scene graph only stores
/// shared handles and passes them back to the `CommandList`.

use std::fmt;

/// Shader stage targeted by push constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices (max ~4 billion vertices)
    U32,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Graphics pipeline created by a backend
pub trait Pipeline: Send + Sync + fmt::Debug {}

/// Immutable set of resource bindings (descriptor set) created by a backend
pub trait BindingGroup: Send + Sync + fmt::Debug {
    /// Set index this group was created for
    fn set_index(&self) -> u32;
}

/// GPU buffer (vertex or index data) created by a backend
pub trait Buffer: Send + Sync + fmt::Debug {
    /// Size in bytes
    fn size(&self) -> u64;
}
