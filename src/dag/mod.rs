// src/dag/mod.rs

//! Dependency graphs, ordering and scheduling state.
//!
//! - [`graph`] builds the dependents / deps views of a task list and
//!   estimates longest downstream paths.
//! - [`queue`] holds the ready queues the topological engine draws from.
//! - [`weight`] turns priority heuristics into queue factories.
//! - [`kahn`] is the topological engine.
//! - [`state`] tracks each task's lifecycle against the computed order.

pub mod graph;
pub mod kahn;
pub mod queue;
pub mod state;
pub mod weight;

pub use graph::{Graph, build_graphs, check_references, longest_path};
pub use kahn::{kahn, kahn_with};
pub use queue::{FifoQueue, ReadyQueue, StackQueue, WeightedQueue};
pub use state::{BatchMode, State, StateCounts};
pub use weight::{
    QueueFactory, WeightFactory, WeightMap, combine_weights, in_order_weight, longest_path_weight,
    prefer, prefer_in_order, prefer_longest_path,
};
