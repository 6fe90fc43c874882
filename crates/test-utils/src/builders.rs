#![allow(dead_code)]

use flowsched::config::{ConfigSection, Flow, FlowFile, RawFlowFile, Task};
use flowsched::types::Preference;

/// Builder for `Flow` to simplify test setup.
pub struct FlowBuilder {
    tasks: Vec<Task>,
    prefer: Option<Vec<Preference>>,
}

impl FlowBuilder {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            prefer: None,
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Shorthand for a task declared with `deps`.
    pub fn task(self, id: &str, deps: &[&str]) -> Self {
        self.with_task(TaskBuilder::new(id).after_all(deps).build())
    }

    pub fn prefer(mut self, prefer: &[Preference]) -> Self {
        self.prefer = Some(prefer.to_vec());
        self
    }

    pub fn build(self) -> Flow {
        Flow::new(self.tasks)
    }

    /// Validated flow file, panicking if the built flow is invalid.
    pub fn build_file(self) -> FlowFile {
        let config = match self.prefer {
            Some(prefer) => ConfigSection { prefer },
            None => ConfigSection::default(),
        };
        let raw = RawFlowFile {
            config,
            tasks: self.tasks,
        };
        FlowFile::try_from(raw).expect("Failed to build valid flow from builder")
    }
}

impl Default for FlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(id),
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.deps.push(dep.to_string());
        self
    }

    pub fn after_all(mut self, deps: &[&str]) -> Self {
        self.task.deps.extend(deps.iter().map(|d| d.to_string()));
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// A, B, C(A, B), D, E(C, D).
pub fn sample_flow() -> Flow {
    FlowBuilder::new()
        .task("A", &[])
        .task("B", &[])
        .task("C", &["A", "B"])
        .task("D", &[])
        .task("E", &["C", "D"])
        .build()
}

/// A(C), B(A), C(B): a three-task cycle.
pub fn cyclic_flow() -> Flow {
    FlowBuilder::new()
        .task("A", &["C"])
        .task("B", &["A"])
        .task("C", &["B"])
        .build()
}
