//! # Course Module
//!
//! An editable course module: a titled card holding an ordered list of file and
//! link resources, with an options menu, upload and link prompts, inline title
//! editing, drag-and-drop reordering and self-clearing status messages.
//!
//! ## Design
//!
//! Everything that owns state is an actor on a Tokio task and is reached through a
//! typed client:
//!
//! - The **module store** is a generic [`ResourceActor`](framework::ResourceActor)
//!   over [`Module`](model::Module)s, wrapped by [`ModuleClient`](clients::ModuleClient).
//! - Each mounted **module widget** is a [`ModuleWidget`](widget::ModuleWidget) loop,
//!   wrapped by [`WidgetClient`](clients::WidgetClient). UI events, document pointer
//!   events and feedback timers all land in its mailbox, so they are handled one at a
//!   time.
//!
//! Within a widget, the pure pieces do the deciding:
//!
//! - [`ResourceStore`](store::ResourceStore) returns a new list for every add,
//!   remove, rename or reorder, or an error and no change.
//! - [`UiModeController`](widget::UiModeController) holds the single active
//!   [`UiMode`](widget::UiMode) and refuses transitions that mode does not allow.
//! - [`DragCoordinator`](widget::DragCoordinator) turns a finished drag into at most
//!   one reorder.
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic ordered resource actor, its client and mocks
//! - [`model`] - modules, resources, colours and ids
//! - [`store`] - the per-module resource list
//! - [`module_actor`] - the module store
//! - [`collaborators`] - uploads, downloads, the link prompt, pointer events, feedback
//! - [`widget`] - the module widget and its state machines
//! - [`clients`] - typed handles for the actors
//! - [`lifecycle`] - [`CourseSystem`](lifecycle::CourseSystem), config, tracing
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! COURSE_MODULE_CONFIG=widget.toml RUST_LOG=debug cargo run
//! ```

pub mod clients;
pub mod collaborators;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod module_actor;
pub mod store;
pub mod widget;
