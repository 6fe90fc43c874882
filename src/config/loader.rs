// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{FlowFile, RawFlowFile};
use crate::errors::{FlowError, Result};

/// Load a flow file and return the raw `RawFlowFile`.
///
/// The format follows the extension: `.toml` or `.json`. This only
/// deserializes; it does **not** check references or acyclicity. Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawFlowFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let raw: RawFlowFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&contents)?,
        Some("json") => serde_json::from_str(&contents)?,
        _ => {
            return Err(FlowError::ConfigError(format!(
                "unsupported flow file '{}' (expected a .toml or .json extension)",
                path.display()
            )));
        }
    };

    debug!(path = %path.display(), tasks = raw.tasks.len(), "flow file loaded");
    Ok(raw)
}

/// Load a flow file from path and validate it.
///
/// This is the recommended entry point:
///
/// - Reads TOML or JSON.
/// - Applies `[config]` defaults.
/// - Checks for duplicate IDs, unknown or self dependencies, and cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<FlowFile> {
    let raw = load_from_path(&path)?;
    FlowFile::try_from(raw)
}

