// src/dag/weight.rs

//! Priority weights and the queue factories derived from them.
//!
//! A weight map assigns each task an integer; among tasks that become ready
//! at the same time, the higher weight is emitted first. Several weight
//! dimensions are folded into one integer with
//! `combined = combined * task_count + dimension`, so the first dimension
//! dominates and later ones only break ties. That holds as long as every
//! dimension stays within `0..=task_count`; custom factories must respect it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::config::model::Task;
use crate::dag::graph::{build_graphs, longest_path};
use crate::dag::queue::{ReadyQueue, StackQueue, WeightedQueue};
use crate::types::TaskId;

pub type WeightMap = HashMap<TaskId, i64>;

/// Derives one weight dimension from a task list.
pub type WeightFactory = fn(&[Task]) -> WeightMap;

/// Zero-argument constructor of fresh, independent ready queues.
pub type QueueFactory = Box<dyn Fn() -> Box<dyn ReadyQueue>>;

/// Earlier-declared tasks weigh more: `len - position`.
pub fn in_order_weight(tasks: &[Task]) -> WeightMap {
    let len = tasks.len() as i64;
    tasks
        .iter()
        .enumerate()
        .map(|(pos, task)| (task.id.clone(), len - pos as i64))
        .collect()
}

/// Tasks with the longest chain of work downstream weigh more.
pub fn longest_path_weight(tasks: &[Task]) -> WeightMap {
    let (dependents, _) = build_graphs(tasks);
    longest_path(&dependents)
}

/// Fold several weight dimensions into one map, most significant first.
///
/// Returns `None` when no factory is given.
pub fn combine_weights(tasks: &[Task], factories: &[WeightFactory]) -> Option<WeightMap> {
    match factories {
        [] => None,
        [single] => Some(single(tasks)),
        many => {
            let base = tasks.len() as i64;
            let mut combined = WeightMap::new();
            for factory in many {
                let dimension = factory(tasks);
                for task in tasks {
                    let prev = combined.get(&task.id).copied().unwrap_or(0);
                    let next = dimension.get(&task.id).copied().unwrap_or(0);
                    combined.insert(
                        task.id.clone(),
                        prev.saturating_mul(base).saturating_add(next),
                    );
                }
            }
            Some(combined)
        }
    }
}

/// Queue factory honouring the given weight dimensions.
///
/// With no dimension, queues are plain stacks. Weights are computed once
/// here; every queue the factory hands out is independent.
pub fn prefer(tasks: &[Task], factories: &[WeightFactory]) -> QueueFactory {
    match combine_weights(tasks, factories) {
        None => {
            trace!("no weight dimensions; using stack queues");
            Box::new(|| Box::new(StackQueue::default()) as Box<dyn ReadyQueue>)
        }
        Some(weights) => {
            trace!(dimensions = factories.len(), ?weights, "weighted queues");
            let weights = Arc::new(weights);
            Box::new(move || {
                Box::new(WeightedQueue::new(Arc::clone(&weights))) as Box<dyn ReadyQueue>
            })
        }
    }
}

pub fn prefer_in_order(tasks: &[Task]) -> QueueFactory {
    prefer(tasks, &[in_order_weight])
}

pub fn prefer_longest_path(tasks: &[Task]) -> QueueFactory {
    prefer(tasks, &[longest_path_weight])
}
