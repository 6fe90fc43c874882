// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::model::Task;
use crate::dag::weight::WeightMap;
use crate::errors::{FlowError, Result};
use crate::types::TaskId;

/// Adjacency-list graph keyed by task ID.
///
/// Node iteration follows insertion order, so every traversal built on top
/// of it is deterministic regardless of hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<TaskId>,
    edges: HashMap<TaskId, Vec<TaskId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` with no edges if it is not present yet.
    pub fn add_node(&mut self, node: &str) {
        if !self.edges.contains_key(node) {
            self.nodes.push(node.to_string());
            self.edges.insert(node.to_string(), Vec::new());
        }
    }

    /// Add the edge `from -> to`, creating either endpoint on demand.
    ///
    /// Parallel edges are kept; the engine counts each of them.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);
        if let Some(targets) = self.edges.get_mut(from) {
            targets.push(to.to_string());
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, node: &str) -> bool {
        self.edges.contains_key(node)
    }

    /// Outgoing edges of `node` (empty for unknown nodes).
    pub fn edges_of(&self, node: &str) -> &[TaskId] {
        self.edges
            .get(node)
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Same nodes, every edge reversed.
    pub fn inverse(&self) -> Graph {
        let mut inverse = Graph::new();
        for node in self.nodes() {
            inverse.add_node(node);
        }
        for node in self.nodes() {
            for target in self.edges_of(node) {
                inverse.add_edge(target, node);
            }
        }
        inverse
    }

    /// Sorted map view, used for persisted snapshots.
    pub fn to_map(&self) -> BTreeMap<TaskId, Vec<TaskId>> {
        self.nodes
            .iter()
            .map(|node| (node.clone(), self.edges_of(node).to_vec()))
            .collect()
    }
}

/// Build the two views of a task list.
///
/// Returns `(dependents, deps)`:
/// - `dependents`: `a -> b` when `b` lists `a` in its deps. This is the
///   direction the topological engine walks.
/// - `deps`: `b -> a` for the same pair, i.e. each task mapped to what it
///   waits on.
///
/// Declared tasks come first in node order, then dependency IDs that were
/// never declared.
pub fn build_graphs(tasks: &[Task]) -> (Graph, Graph) {
    let mut deps = Graph::new();
    for task in tasks {
        deps.add_node(&task.id);
    }
    for task in tasks {
        for dep in &task.deps {
            deps.add_edge(&task.id, dep);
        }
    }
    (deps.inverse(), deps)
}

/// Reject duplicate task IDs and dependencies on undeclared tasks.
///
/// Either would otherwise surface later as a generic invalid-DAG failure, or
/// not at all.
pub fn check_references(tasks: &[Task]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(FlowError::DuplicateTask(task.id.clone()));
        }
    }

    for task in tasks {
        for dep in &task.deps {
            if !seen.contains(dep.as_str()) {
                return Err(FlowError::UnknownDependency {
                    task: task.id.clone(),
                    dep: dep.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Length (in edges) of the longest path from each node to a sink.
///
/// Memoized depth-first search on an explicit stack, so chain length is not
/// bounded by the thread's stack. Every node is expanded once. A node is
/// marked before its successors are visited, so on a cyclic graph this still
/// terminates, with values that mean nothing. Callers that need validity must
/// rely on [`kahn_with`](crate::dag::kahn_with).
pub fn longest_path(graph: &Graph) -> WeightMap {
    let mut memo = WeightMap::new();
    for node in graph.nodes() {
        if !memo.contains_key(node) {
            longest_from(graph, node, &mut memo);
        }
    }
    memo
}

// Frame: (node, index of the next edge to visit, deepest successor so far).
fn longest_from<'g>(graph: &'g Graph, root: &'g str, memo: &mut WeightMap) {
    memo.insert(root.to_string(), 0);
    let mut stack: Vec<(&'g str, usize, i64)> = vec![(root, 0, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next_edge, depth) = *frame;

        if let Some(next) = graph.edges_of(node).get(next_edge) {
            frame.1 += 1;
            let known = memo.get(next.as_str()).copied();
            match known {
                Some(d) => frame.2 = depth.max(d + 1),
                None => {
                    memo.insert(next.clone(), 0);
                    stack.push((next.as_str(), 0, 0));
                }
            }
            continue;
        }

        memo.insert(node.to_string(), depth);
        stack.pop();
        if let Some(parent) = stack.last_mut() {
            parent.2 = parent.2.max(depth + 1);
        }
    }
}
