// src/dag/kahn.rs

//! Kahn's algorithm, generalized over the ready queue.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dag::graph::Graph;
use crate::dag::queue::{FifoQueue, ReadyQueue};
use crate::errors::{FlowError, Result};
use crate::types::TaskId;

/// Topological order of `graph` with a FIFO ready queue.
///
/// Useful as a plain validity check when tie-break order does not matter.
pub fn kahn(graph: &Graph) -> Result<Vec<TaskId>> {
    kahn_with(graph, FifoQueue::default)
}

/// Topological order of `graph`, drawing ready nodes from queues built by
/// `factory`.
///
/// Edges run from the node emitted first to the node emitted later. Nodes
/// that start ready are seeded in graph node order; after that, whichever
/// node the queue yields is emitted next. If any node is left with unmet
/// in-degree once the queue drains, the graph has a cycle and the first such
/// node is reported.
pub fn kahn_with<F, Q>(graph: &Graph, factory: F) -> Result<Vec<TaskId>>
where
    F: Fn() -> Q,
    Q: ReadyQueue,
{
    let mut in_degree: HashMap<&str, usize> = graph.nodes().map(|node| (node, 0)).collect();
    for node in graph.nodes() {
        for target in graph.edges_of(node) {
            if let Some(count) = in_degree.get_mut(target.as_str()) {
                *count += 1;
            }
        }
    }

    let mut queue = factory();
    for node in graph.nodes() {
        if in_degree.get(node) == Some(&0) {
            queue.put(node.to_string());
        }
    }

    let mut order = Vec::with_capacity(graph.len());
    while let Some(node) = queue.get() {
        trace!(node = %node, ready = queue.len(), "emit");
        for target in graph.edges_of(&node) {
            if let Some(count) = in_degree.get_mut(target.as_str()) {
                *count -= 1;
                if *count == 0 {
                    queue.put(target.clone());
                }
            }
        }
        order.push(node);
    }

    if let Some(stuck) = graph.nodes().find(|node| in_degree.get(node) != Some(&0)) {
        debug!(node = %stuck, emitted = order.len(), total = graph.len(), "graph is not a DAG");
        return Err(FlowError::InvalidDag(stuck.to_string()));
    }

    Ok(order)
}
