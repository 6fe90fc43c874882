// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::dag::state::State;
use crate::dag::weight::{self, WeightFactory};
use crate::errors::Result;
use crate::types::{Preference, TaskId};

/// A single task declaration.
///
/// ```toml
/// [[tasks]]
/// id = "E"
/// deps = ["C", "D"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    /// IDs of the tasks this one waits on. Omitted on the wire when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<TaskId>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            deps: Vec::new(),
        }
    }

    pub fn with_deps<I, S>(id: impl Into<TaskId>, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        Self {
            id: id.into(),
            deps: deps.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered task list. Declaration order only matters as a tie-break signal
/// (see [`weight::in_order_weight`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Flow {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

/// A flow definition as read from disk: the flow itself plus an optional
/// `[config]` section.
///
/// ```toml
/// [config]
/// prefer = ["longest_path", "in_order"]
///
/// [[tasks]]
/// id = "A"
///
/// [[tasks]]
/// id = "B"
/// deps = ["A"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlowFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// `[config]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigSection {
    /// Priority heuristics, most significant first. An empty list disables
    /// prioritisation entirely.
    #[serde(default = "default_prefer")]
    pub prefer: Vec<Preference>,
}

fn default_prefer() -> Vec<Preference> {
    vec![Preference::LongestPath, Preference::InOrder]
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            prefer: default_prefer(),
        }
    }
}

impl ConfigSection {
    /// Weight factories matching `prefer`, in the same order.
    pub fn weight_factories(&self) -> Vec<WeightFactory> {
        self.prefer
            .iter()
            .map(|p| match p {
                Preference::LongestPath => weight::longest_path_weight as WeightFactory,
                Preference::InOrder => weight::in_order_weight as WeightFactory,
            })
            .collect()
    }
}

/// A flow file that passed [`crate::config::validate_flow`].
///
/// Only constructible through validation, so holders can rely on unique IDs,
/// known dependencies and acyclicity.
#[derive(Debug, Clone)]
pub struct FlowFile {
    pub config: ConfigSection,
    pub flow: Flow,
}

impl FlowFile {
    pub(crate) fn new_unchecked(config: ConfigSection, tasks: Vec<Task>) -> Self {
        Self {
            config,
            flow: Flow { tasks },
        }
    }

    /// Build a fresh scheduling state using the file's `[config].prefer`.
    pub fn into_state(self) -> Result<State> {
        let factories = self.config.weight_factories();
        State::new(self.flow.tasks, &factories)
    }
}
