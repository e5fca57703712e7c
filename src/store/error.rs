//! Error types for resource list operations.

use crate::model::ResourceId;
use thiserror::Error;

/// Why a resource list operation was refused. The list is left untouched in
/// every case.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// The referenced resource is no longer in the list.
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),

    /// A resource with this id is already in the list.
    #[error("Duplicate resource id: {0}")]
    DuplicateId(ResourceId),

    /// A reorder index points outside the list.
    #[error("Reorder {from} -> {to} out of range for {len} resources")]
    InvalidRange { from: usize, to: usize, len: usize },

    /// A drag reported the resource at an index it no longer occupies.
    #[error("Resource {id} is not at index {index}")]
    StaleIndex { id: ResourceId, index: usize },

    /// A link was submitted without a URL.
    #[error("Link URL is empty")]
    EmptyInput,
}
