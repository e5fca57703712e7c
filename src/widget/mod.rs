//! The interactive module card.
//!
//! - [`ui_mode`] - which menu, prompt or editor is open
//! - [`drag`] - turns a finished drag into one reorder
//! - [`feedback`] - status messages that clear themselves
//! - [`messages`] - events, outcomes and snapshots
//! - [`actor`] - the [`ModuleWidget`] event loop tying them together

pub mod actor;
pub mod drag;
pub mod feedback;
pub mod messages;
pub mod ui_mode;

pub use actor::*;
pub use drag::{DragCommit, DragCoordinator, DragLocation};
pub use feedback::{AfterClear, FeedbackScheduler, Ticket};
pub use messages::*;
pub use ui_mode::*;
