//! # Module Store
//!
//! The collection of modules that sit side by side in a course. A widget never
//! touches other modules; it only removes itself or map-updates its own record.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Module`]
//! - [`error`] - [`ModuleError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use course_module::clients::ModuleClient;
//! use course_module::model::Module;
//! use course_module::module_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = module_actor::new(32);
//!     let modules = ModuleClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     modules
//!         .replace_modules(vec![Module::new("m1", "Week 1"), Module::new("m2", "Week 2")])
//!         .await?;
//!     modules.remove_module("m1".into()).await?;
//!     assert_eq!(modules.list_modules().await?.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Module;

/// Creates a new module store actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Module>, ResourceClient<Module>) {
    ResourceActor::new(buffer_size)
}
