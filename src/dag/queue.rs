// src/dag/queue.rs

//! Ready queues used by the topological engine.
//!
//! The engine only needs `put`/`get`/`len`; which node comes out next is
//! entirely the queue's business. That is what lets priority heuristics plug
//! in without touching the traversal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;

use crate::dag::weight::WeightMap;
use crate::types::TaskId;

pub trait ReadyQueue {
    fn put(&mut self, node: TaskId);

    /// Next node to emit, or `None` once drained.
    fn get(&mut self) -> Option<TaskId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Q: ReadyQueue + ?Sized> ReadyQueue for Box<Q> {
    fn put(&mut self, node: TaskId) {
        (**self).put(node)
    }

    fn get(&mut self) -> Option<TaskId> {
        (**self).get()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Last in, first out. No priority at all.
#[derive(Debug, Default)]
pub struct StackQueue {
    nodes: Vec<TaskId>,
}

impl ReadyQueue for StackQueue {
    fn put(&mut self, node: TaskId) {
        self.nodes.push(node);
    }

    fn get(&mut self) -> Option<TaskId> {
        self.nodes.pop()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct FifoQueue {
    nodes: VecDeque<TaskId>,
}

impl ReadyQueue for FifoQueue {
    fn put(&mut self, node: TaskId) {
        self.nodes.push_back(node);
    }

    fn get(&mut self) -> Option<TaskId> {
        self.nodes.pop_front()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    weight: i64,
    seq: u64,
    node: TaskId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on weight; among equal weights the earlier insertion wins.
        self.weight
            .cmp(&other.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Highest weight first, backed by a binary heap.
///
/// Nodes missing from the weight map weigh 0. The weight map is shared
/// read-only between queues built from the same factory.
#[derive(Debug)]
pub struct WeightedQueue {
    weights: Arc<WeightMap>,
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl WeightedQueue {
    pub fn new(weights: Arc<WeightMap>) -> Self {
        Self {
            weights,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl ReadyQueue for WeightedQueue {
    fn put(&mut self, node: TaskId) {
        let weight = self.weights.get(&node).copied().unwrap_or(0);
        self.heap.push(Entry {
            weight,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    fn get(&mut self) -> Option<TaskId> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
