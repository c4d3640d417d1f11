/*!
# Galaxy 3D Scene Graph

Scene graph and record traversal for the Galaxy 3D rendering engine.

A scene is a DAG of shared nodes (`Arc<dyn Node>`). Once per frame a
`RecordTraversal` walks it depth first, maintains the nested transform and
state stacks, culls bounded subtrees against the view frustum, selects
levels of detail, pages in external subgraphs in the background, and
appends draw and state commands to a backend `CommandList`.

## Architecture

- **Node / Visitor**: open double-dispatch over node kinds
- **RecordTraversal**: the per-frame recorder
- **TransformStack / StateStack**: nested matrices and per-slot bindings
- **Culler**: frustum tests against local-space planes
- **PagingCoordinator / DatabasePager**: residency table and loader threads

GPU objects and command lists are traits implemented by backends.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod render;
pub mod culling;
pub mod node;
pub mod traversal;
pub mod paging;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod render {
        pub use crate::render::*;
    }

    pub mod culling {
        pub use crate::culling::*;
    }

    pub mod node {
        pub use crate::node::*;
    }

    pub mod traversal {
        pub use crate::traversal::*;
    }

    pub mod paging {
        pub use crate::paging::*;
    }
}

// Re-export math library at crate root
pub use glam;
