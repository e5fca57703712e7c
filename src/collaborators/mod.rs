//! Edges of the widget: the things it talks to but does not own.
//!
//! - [`upload`] - picked files and the handles resources keep to them
//! - [`download`] - saving a file resource's bytes
//! - [`link`] - validating what the link prompt returns
//! - [`pointer`] - document-wide pointer-down events for click-outside dismissal
//! - [`feedback`] - the transient status line

pub mod download;
pub mod feedback;
pub mod link;
pub mod pointer;
pub mod upload;

pub use download::*;
pub use feedback::*;
pub use link::*;
pub use pointer::*;
pub use upload::*;
