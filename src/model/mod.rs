//! Pure data structures: modules, their resources, and the values resources carry.

pub mod color;
pub mod module;
pub mod resource;

pub use color::*;
pub use module::*;
pub use resource::*;
