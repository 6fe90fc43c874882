// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::TaskState;

#[derive(Error, Debug)]
pub enum FlowError {
    /// A cycle, or an edge that can never be satisfied, is left after the
    /// topological pass. Carries one offending node.
    #[error("Invalid DAG node {0}")]
    InvalidDag(String),

    #[error("task '{task}' has unknown dependency '{dep}'")]
    UnknownDependency { task: String, dep: String },

    #[error("task '{0}' is declared more than once")]
    DuplicateTask(String),

    #[error("{0} is not found")]
    TaskNotFound(String),

    #[error("can not move task {task} from {from} to {to}")]
    InvalidTransition {
        task: String,
        from: TaskState,
        to: TaskState,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML encoding error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
