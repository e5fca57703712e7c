//! # Lifecycle
//!
//! Starting and stopping the system.
//!
//! - [`course_system`] - spawns the module store and mounts widgets on it
//! - [`config`] - capacities and feedback delays from TOML
//! - [`tracing`] - subscriber setup for binaries and examples

pub mod config;
pub mod course_system;
pub mod tracing;

pub use config::{ConfigError, FeedbackDelays, WidgetConfig};
pub use course_system::*;
pub use self::tracing::setup_tracing;
