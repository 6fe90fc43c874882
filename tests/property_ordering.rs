// tests/property_ordering.rs

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;

use flowsched::dag::{
    WeightFactory, build_graphs, in_order_weight, kahn, kahn_with, longest_path_weight, prefer,
};
use flowsched::{FlowError, State, Task, TaskState};

fn name(i: usize) -> String {
    format!("task_{}", i)
}

// Acyclic by construction: task N may only depend on tasks 0..N-1. The
// declaration order is optionally reversed so it is not always topological.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        );

        (deps_strat, any::<bool>()).prop_map(|(raw_deps, reverse)| {
            let mut tasks: Vec<Task> = raw_deps
                .into_iter()
                .enumerate()
                .map(|(i, potential)| {
                    let mut seen = HashSet::new();
                    let deps: Vec<String> = potential
                        .into_iter()
                        .filter(|_| i > 0)
                        .map(|d| d % i)
                        .filter(|d| seen.insert(*d))
                        .map(name)
                        .collect();
                    Task::with_deps(name(i), deps)
                })
                .collect();
            if reverse {
                tasks.reverse();
            }
            tasks
        })
    })
}

// Arbitrary edges, cycles and self-loops included.
fn any_graph_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        proptest::collection::vec(
            proptest::collection::vec(0..num_tasks, 0..3),
            num_tasks,
        )
        .prop_map(|raw_deps| {
            raw_deps
                .into_iter()
                .enumerate()
                .map(|(i, deps)| Task::with_deps(name(i), deps.into_iter().map(name)))
                .collect()
        })
    })
}

fn factory_sets() -> Vec<Vec<WeightFactory>> {
    vec![
        Vec::new(),
        vec![in_order_weight as WeightFactory],
        vec![longest_path_weight as WeightFactory],
        vec![
            longest_path_weight as WeightFactory,
            in_order_weight as WeightFactory,
        ],
    ]
}

fn assert_topological(tasks: &[Task], order: &[String]) -> Result<(), TestCaseError> {
    prop_assert_eq!(order.len(), tasks.len());
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    prop_assert_eq!(position.len(), tasks.len(), "order has duplicates");

    for task in tasks {
        for dep in &task.deps {
            prop_assert!(
                position[dep.as_str()] < position[task.id.as_str()],
                "{} emitted before its dependency {}",
                task.id,
                dep
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_queue_discipline_yields_a_topological_order(tasks in dag_strategy(12)) {
        let (graph, _) = build_graphs(&tasks);

        assert_topological(&tasks, &kahn(&graph).expect("acyclic"))?;

        for factories in factory_sets() {
            let order = kahn_with(&graph, prefer(&tasks, &factories)).expect("acyclic");
            assert_topological(&tasks, &order)?;
        }
    }

    #[test]
    fn ordering_is_deterministic(tasks in dag_strategy(12)) {
        let (graph, _) = build_graphs(&tasks);
        for factories in factory_sets() {
            let first = kahn_with(&graph, prefer(&tasks, &factories)).expect("acyclic");
            let second = kahn_with(&graph, prefer(&tasks, &factories)).expect("acyclic");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn composite_weights_emit_the_heaviest_ready_task(tasks in dag_strategy(12)) {
        let (graph, deps) = build_graphs(&tasks);
        let order = kahn_with(&graph, prefer(&tasks, &[longest_path_weight, in_order_weight]))
            .expect("acyclic");

        let lp = longest_path_weight(&tasks);
        let position: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (task.id.as_str(), i))
            .collect();

        // Replay the traversal: at every step the emitted task must have the
        // longest path among the ready ones, ties going to the earlier
        // declaration.
        let mut emitted: HashSet<&str> = HashSet::new();
        for id in &order {
            let ready: Vec<&str> = tasks
                .iter()
                .map(|task| task.id.as_str())
                .filter(|t| !emitted.contains(t))
                .filter(|t| deps.edges_of(t).iter().all(|d| emitted.contains(d.as_str())))
                .collect();
            prop_assert!(ready.contains(&id.as_str()), "{} emitted before it was ready", id);

            let best = ready
                .iter()
                .copied()
                .max_by_key(|t| (lp[*t], Reverse(position[t])))
                .expect("at least one ready task");
            prop_assert_eq!(id.as_str(), best, "ready set {:?}", ready);
            emitted.insert(id.as_str());
        }
    }

    #[test]
    fn construction_fails_exactly_on_cycles(tasks in any_graph_strategy(8)) {
        let mut oracle: DiGraphMap<&str, ()> = DiGraphMap::new();
        for task in &tasks {
            oracle.add_node(task.id.as_str());
        }
        for task in &tasks {
            for dep in &task.deps {
                oracle.add_edge(dep.as_str(), task.id.as_str(), ());
            }
        }
        let cyclic = toposort(&oracle, None).is_err();

        match State::new(tasks.clone(), &[longest_path_weight, in_order_weight]) {
            Ok(state) => {
                prop_assert!(!cyclic, "cyclic flow accepted");
                assert_topological(&tasks, state.order())?;
            }
            Err(FlowError::InvalidDag(_)) => prop_assert!(cyclic, "acyclic flow rejected"),
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    #[test]
    fn simulated_run_releases_each_task_once(
        tasks in dag_strategy(10),
        picks in proptest::collection::vec(any::<usize>(), 1..40),
    ) {
        let mut state = State::new(tasks.clone(), &[longest_path_weight, in_order_weight])
            .expect("acyclic");
        let mut released: HashSet<String> = HashSet::new();
        let mut running: Vec<String> = Vec::new();
        let mut picks = picks.into_iter().cycle();

        // Each step either starts a ready task or finishes a running one, so
        // 2 * n steps are always enough.
        for _ in 0..(2 * tasks.len()) {
            let ready = state.schedule();
            prop_assert_eq!(&ready, &state.schedule());

            for id in &ready {
                prop_assert!(!released.contains(id), "{} released twice", id);
                for dep in state.deps_of(id) {
                    prop_assert_eq!(state.state_of(dep), Some(TaskState::Done));
                }
            }

            let pick = picks.next().unwrap_or(0);
            if !ready.is_empty() && (running.is_empty() || pick % 2 == 0) {
                let id = ready[pick % ready.len()].clone();
                state.run([&id]).expect("ready task can run");
                released.insert(id.clone());
                running.push(id);
            } else if !running.is_empty() {
                let id = running.remove(pick % running.len());
                state.finish([&id]).expect("running task can finish");
            } else {
                break;
            }
        }

        prop_assert!(state.is_complete(), "flow did not drain: {:?}", state.counts());
        prop_assert_eq!(released.len(), tasks.len());
        prop_assert!(state.schedule().is_empty());
    }
}
