//! Error types for the Galaxy3D scene graph
//!
//! This module defines the error types used throughout the record traversal,
//! the state stacks, and the paging subsystem.

use std::fmt;

/// Result type for Galaxy3D scene graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D scene graph errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend or contract error (raised by command targets and `engine_err!`)
    BackendError(String),

    /// Initialization failed (traversal, pager, subsystems)
    InitializationFailed(String),

    /// State slot outside `0..max_slot`
    SlotOutOfRange {
        /// Requested slot
        slot: u32,
        /// Configured number of slots
        max_slot: u32,
    },

    /// Pop on a state slot with no pushed binding
    StateStackUnderflow {
        /// Slot that was popped
        slot: u32,
    },

    /// No command target bound to the traversal
    MissingCommandTarget,

    /// Loading an external subgraph failed
    LoadFailed {
        /// Key of the external subgraph
        key: String,
        /// Loader-provided reason
        reason: String,
    },

    /// The database pager has been shut down
    PagerShutdown,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::SlotOutOfRange { slot, max_slot } => {
                write!(f, "State slot {} out of range (max_slot = {})", slot, max_slot)
            }
            Error::StateStackUnderflow { slot } => {
                write!(f, "State slot {} popped without a matching push", slot)
            }
            Error::MissingCommandTarget => write!(f, "No command target bound to traversal"),
            Error::LoadFailed { key, reason } => {
                write!(f, "Failed to load '{}': {}", key, reason)
            }
            Error::PagerShutdown => write!(f, "Database pager has been shut down"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
