//! Generic actor framework for ordered collections.
//!
//! This module provides the building blocks for actors that own an ordered list of
//! entities and serve CRUD plus whole-list operations over a channel.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that collection items implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the ordered collection
//! - [`ResourceClient`] - Type-safe handle for sending requests
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
