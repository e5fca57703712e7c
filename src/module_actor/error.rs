//! Error types for the module store.

use thiserror::Error;

/// Errors that can occur during module operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModuleError {
    /// The requested module was not found.
    #[error("Module not found: {0}")]
    NotFound(String),

    /// Two modules in one list share an id.
    #[error("Duplicate module id: {0}")]
    DuplicateId(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
