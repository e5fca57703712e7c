//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG` (default `info`). Module paths are hidden (`with_target(false)`);
//! log lines carry `entity_type` and `module_id` fields instead.
//!
//! ```bash
//! # Applied mutations and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every event, payloads and drag progress
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` an upload followed by its auto-clear reads:
//!
//! ```text
//! INFO Widget mounted entity_type="ModuleWidget" module_id=m1 size=0
//! INFO Resources committed entity_type="ModuleWidget" module_id=m1 size=1
//! INFO Updated entity_type="Module" id=m1
//! ```
//!
//! Rejected events show up at `warn`:
//!
//! ```text
//! WARN Event ignored module_id=m1 reason=RequestUpload is not enabled in idle mode
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type and module_id identify the source
        .compact()
        .init();
}
