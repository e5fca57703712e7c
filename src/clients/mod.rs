//! Typed handles onto the running actors.
//!
//! [`ModuleClient`] wraps the generic [`ResourceClient`](crate::framework::ResourceClient)
//! of the module store; [`WidgetClient`] is the mailbox of one mounted module widget.

pub mod actor_client;
pub mod module_client;
pub mod widget_client;

pub use actor_client::*;
pub use module_client::*;
pub use widget_client::*;
