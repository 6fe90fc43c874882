// src/dag/state.rs

//! Scheduling state: the precomputed order plus live per-task lifecycle.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::model::Task;
use crate::dag::graph::{build_graphs, check_references};
use crate::dag::kahn::kahn_with;
use crate::dag::weight::{WeightFactory, prefer};
use crate::errors::{FlowError, Result};
use crate::types::{TaskId, TaskState};

/// How a batch of transitions reacts to a bad ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Apply IDs one by one and stop at the first failure. Transitions
    /// already applied in the batch stay applied.
    #[default]
    BestEffort,
    /// Check the whole batch first; on failure nothing changes.
    Atomic,
}

/// Per-state tallies, see [`State::counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    pub scheduling: usize,
    pub running: usize,
    pub done: usize,
}

/// Everything the scheduler knows about one flow.
///
/// Only `task_states` changes after construction, and only through
/// [`State::run`] and [`State::finish`] (or their `_with` variants). The
/// whole struct serializes to the persisted snapshot format and back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    // Plain arrays ahead of tables so the TOML encoding stays valid.
    /// Topological order computed at construction.
    order: Vec<TaskId>,
    tasks: Vec<Task>,
    task_states: BTreeMap<TaskId, TaskState>,
    /// Each task mapped to the tasks it waits on.
    i_graph: BTreeMap<TaskId, Vec<TaskId>>,
}

impl State {
    /// Validate `tasks`, order them with the given weight dimensions and
    /// start every task in [`TaskState::Scheduling`].
    pub fn new(tasks: Vec<Task>, weight_factories: &[WeightFactory]) -> Result<Self> {
        check_references(&tasks)?;

        let (dependents, deps) = build_graphs(&tasks);
        let order = kahn_with(&dependents, prefer(&tasks, weight_factories))?;

        let task_states = tasks
            .iter()
            .map(|task| (task.id.clone(), TaskState::Scheduling))
            .collect();

        debug!(
            tasks = tasks.len(),
            dimensions = weight_factories.len(),
            ?order,
            "scheduling state built"
        );

        Ok(Self {
            tasks,
            task_states,
            order,
            i_graph: deps.to_map(),
        })
    }

    /// IDs of tasks that can start now: still `Scheduling`, with every
    /// dependency `Done`. Returned in precomputed order.
    ///
    /// Read-only, so repeated calls without `run`/`finish` in between return
    /// the same batch.
    pub fn schedule(&self) -> Vec<TaskId> {
        self.order
            .iter()
            .filter(|id| self.state_of(id) == Some(TaskState::Scheduling) && self.deps_done(id))
            .cloned()
            .collect()
    }

    /// Mark tasks `Running`, best effort.
    pub fn run<I, S>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with(BatchMode::BestEffort, ids)
    }

    /// Mark tasks `Done`, best effort. Tasks may skip `Running`.
    pub fn finish<I, S>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.finish_with(BatchMode::BestEffort, ids)
    }

    pub fn run_with<I, S>(&mut self, mode: BatchMode, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.transition(mode, ids, TaskState::Running)
    }

    pub fn finish_with<I, S>(&mut self, mode: BatchMode, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.transition(mode, ids, TaskState::Done)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    pub fn task_states(&self) -> &BTreeMap<TaskId, TaskState> {
        &self.task_states
    }

    pub fn state_of(&self, id: &str) -> Option<TaskState> {
        self.task_states.get(id).copied()
    }

    /// Direct dependencies of `id` (empty for unknown IDs).
    pub fn deps_of(&self, id: &str) -> &[TaskId] {
        self.i_graph
            .get(id)
            .map(|deps| deps.as_slice())
            .unwrap_or(&[])
    }

    pub fn counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for state in self.task_states.values() {
            match state {
                TaskState::Scheduling => counts.scheduling += 1,
                TaskState::Running => counts.running += 1,
                TaskState::Done => counts.done += 1,
            }
        }
        counts
    }

    /// `true` once every task is `Done`.
    pub fn is_complete(&self) -> bool {
        self.task_states
            .values()
            .all(|state| *state == TaskState::Done)
    }

    fn deps_done(&self, id: &str) -> bool {
        self.deps_of(id)
            .iter()
            .all(|dep| self.state_of(dep) == Some(TaskState::Done))
    }

    fn transition<I, S>(&mut self, mode: BatchMode, ids: I, to: TaskState) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<S> = ids.into_iter().collect();

        if mode == BatchMode::Atomic {
            // Dry run against a staged overlay so repeated IDs in one batch
            // are judged against their post-transition state.
            let mut staged: HashMap<&str, TaskState> = HashMap::new();
            for id in &ids {
                let id = id.as_ref();
                let from = match staged.get(id) {
                    Some(&state) => state,
                    None => self.current(id)?,
                };
                check_transition(id, from, to)?;
                staged.insert(id, to);
            }
        }

        for id in &ids {
            let id = id.as_ref();
            let from = self.current(id)?;
            check_transition(id, from, to)?;
            if let Some(slot) = self.task_states.get_mut(id) {
                *slot = to;
            }
            debug!(task = %id, %from, %to, "task state changed");
        }
        Ok(())
    }

    fn current(&self, id: &str) -> Result<TaskState> {
        self.state_of(id)
            .ok_or_else(|| FlowError::TaskNotFound(id.to_string()))
    }
}

/// Legal moves: `Scheduling -> Running`, and anything but `Done -> Done`.
fn check_transition(id: &str, from: TaskState, to: TaskState) -> Result<()> {
    let allowed = match to {
        TaskState::Running => from == TaskState::Scheduling,
        TaskState::Done => from != TaskState::Done,
        TaskState::Scheduling => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(FlowError::InvalidTransition {
            task: id.to_string(),
            from,
            to,
        })
    }
}
