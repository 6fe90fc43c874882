// src/config/mod.rs

//! Flow definitions and their loading.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a flow file from disk (`loader.rs`).
//! - Validate references and acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigSection, Flow, FlowFile, RawFlowFile, Task};
pub use validate::validate_flow;
