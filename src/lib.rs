// src/lib.rs

//! Dependency-ordered task scheduling.
//!
//! A [`Flow`] of tasks with dependency IDs is validated, ordered
//! topologically (ties broken by configurable weights) and turned into a
//! [`State`] that answers "which tasks can start now?" as the caller reports
//! tasks running and done. Nothing here executes work or does I/O except the
//! flow loader and the codecs.

pub mod codec;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod types;

use std::path::Path;

use tracing::info;

pub use crate::config::{Flow, FlowFile, Task};
pub use crate::dag::{BatchMode, State};
pub use crate::errors::{FlowError, Result};
pub use crate::types::{Preference, TaskId, TaskState};

/// Load and validate the flow file at `path`, then build its scheduling
/// state with the file's `[config].prefer` heuristics.
pub fn state_from_path(path: impl AsRef<Path>) -> Result<State> {
    let path = path.as_ref();
    let file = config::load_and_validate(path)?;
    info!(
        path = %path.display(),
        tasks = file.flow.tasks.len(),
        prefer = ?file.config.prefer,
        "building scheduling state"
    );
    file.into_state()
}
