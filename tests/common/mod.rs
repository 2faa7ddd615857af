// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use recursion_stepper::engine::{Algorithm, CallPath, CallTree};
use recursion_stepper::CallId;

/// Install a `tracing` subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Step the whole tree until nothing is left to do, returning the number of
/// steps and the paths acted on, in order.
pub fn step_to_end<A: Algorithm>(tree: &mut CallTree<A>) -> Vec<CallPath> {
    let root = tree.root();
    let mut acted_on = Vec::new();
    while let Some(call) = tree.step(root) {
        acted_on.push(path(tree, call));
    }
    acted_on
}

/// Step the whole tree to completion and return the root's result.
pub fn solve_by_stepping<A: Algorithm>(tree: &mut CallTree<A>) -> A::Output {
    step_to_end(tree);
    let root = tree.root();
    match tree.solved_result(root) {
        Some(result) => result.clone(),
        None => panic!("Stepping stopped before the root was solved"),
    }
}

/// Undo every step, returning how many were undone.
pub fn back_to_start<A: Algorithm>(tree: &mut CallTree<A>) -> usize {
    let root = tree.root();
    let mut count = 0;
    while tree.back(root).is_some() {
        count += 1;
    }
    count
}

pub fn path<A: Algorithm>(tree: &CallTree<A>, call: CallId) -> CallPath {
    match tree.path_from_root(call) {
        Some(path) => path,
        None => panic!("Call {:?} is not in the tree", call),
    }
}

/// The live call at `names` below the root.
pub fn at<A: Algorithm>(tree: &CallTree<A>, names: &[&str]) -> CallId {
    match tree.call_from_root(&CallPath::from(names)) {
        Some(call) => call,
        None => panic!("No call at {:?}", names),
    }
}

/// Naive Fibonacci with the same base case as the plug-in.
pub fn fibonacci(n: i64) -> i64 {
    if n <= 2 {
        1
    } else {
        fibonacci(n - 1) + fibonacci(n - 2)
    }
}

/// Length of the longest common subsequence, by dynamic programming.
pub fn lcs_length(first: &[i64], second: &[i64]) -> usize {
    let mut table = vec![vec![0usize; second.len() + 1]; first.len() + 1];
    for i in 1..=first.len() {
        for j in 1..=second.len() {
            table[i][j] = if first[i - 1] == second[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[first.len()][second.len()]
}

/// Whether `sub` can be obtained from `list` by deleting elements.
pub fn is_subsequence(sub: &[i64], list: &[i64]) -> bool {
    let mut rest = list.iter();
    sub.iter().all(|wanted| rest.any(|value| value == wanted))
}
