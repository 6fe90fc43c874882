// src/config/validate.rs

use crate::config::model::{FlowFile, RawFlowFile};
use crate::dag::{build_graphs, check_references, kahn};
use crate::errors::{FlowError, Result};

impl TryFrom<RawFlowFile> for FlowFile {
    type Error = FlowError;

    fn try_from(raw: RawFlowFile) -> std::result::Result<Self, Self::Error> {
        validate_flow(&raw)?;
        Ok(FlowFile::new_unchecked(raw.config, raw.tasks))
    }
}

/// Semantic checks on a freshly deserialized flow file.
pub fn validate_flow(raw: &RawFlowFile) -> Result<()> {
    ensure_has_tasks(raw)?;
    validate_task_ids(raw)?;
    check_references(&raw.tasks)?;
    validate_dag(raw)?;
    Ok(())
}

fn ensure_has_tasks(raw: &RawFlowFile) -> Result<()> {
    if raw.tasks.is_empty() {
        return Err(FlowError::ConfigError(
            "flow must contain at least one [[tasks]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_ids(raw: &RawFlowFile) -> Result<()> {
    for task in &raw.tasks {
        if task.id.trim().is_empty() {
            return Err(FlowError::ConfigError(
                "task id must not be empty".to_string(),
            ));
        }
        if task.deps.iter().any(|dep| *dep == task.id) {
            return Err(FlowError::ConfigError(format!(
                "task '{}' cannot depend on itself in `deps`",
                task.id
            )));
        }
    }
    Ok(())
}

fn validate_dag(raw: &RawFlowFile) -> Result<()> {
    // FIFO order is enough here; priorities only matter once a state is built.
    let (dependents, _) = build_graphs(&raw.tasks);
    kahn(&dependents).map(|_| ())
}
