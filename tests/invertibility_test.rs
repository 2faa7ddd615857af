// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `back` undoes `step` exactly, and `step` redoes `back` exactly, from any
//! state reached by stepping the root forwards and backwards.

mod common;

use common::{at, back_to_start, init_tracing, path, solve_by_stepping, step_to_end};
use proptest::prelude::*;
use recursion_stepper::algorithms::{
    Fibonacci, FibonacciInput, LcsInput, LongestCommonSubsequence, MergeSort, MergeSortInput,
};
use recursion_stepper::engine::{Algorithm, CallPath};
use recursion_stepper::{CallTree, StepperConfig};

/// Take up to `steps` steps from the root.
fn advance<A: Algorithm>(tree: &mut CallTree<A>, steps: usize) {
    let root = tree.root();
    for _ in 0..steps {
        if tree.step(root).is_none() {
            break;
        }
    }
}

/// Check step-then-back and back-then-step around the current state.
fn check_round_trips<A: Algorithm>(tree: &mut CallTree<A>) -> Result<(), TestCaseError> {
    let root = tree.root();
    let before = tree.snapshot();

    if let Some(stepped) = tree.step(root) {
        let undone = tree.back(root);
        prop_assert_eq!(undone, Some(stepped));
        prop_assert_eq!(tree.snapshot(), before.clone());
    }
    if tree.back(root).is_some() {
        prop_assert!(tree.step(root).is_some());
        prop_assert_eq!(tree.snapshot(), before);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn fibonacci_step_back_round_trip(
        n in 1i64..=7,
        memoise in any::<bool>(),
        steps in 0usize..40,
    ) {
        init_tracing();
        let config = StepperConfig::default().with_memoise(memoise);
        let mut tree =
            CallTree::prepared(Fibonacci, FibonacciInput::new(n).unwrap(), &config).unwrap();
        advance(&mut tree, steps);
        check_round_trips(&mut tree)?;
    }

    #[test]
    fn merge_sort_step_back_round_trip(
        values in proptest::collection::vec(-9i64..9, 1..7),
        steps in 0usize..30,
    ) {
        let mut tree = CallTree::new(MergeSort, MergeSortInput::new(&values).unwrap());
        advance(&mut tree, steps);
        check_round_trips(&mut tree)?;
    }

    #[test]
    fn lcs_step_back_round_trip(
        first in proptest::collection::vec(0i64..3, 0..=3),
        second in proptest::collection::vec(0i64..3, 0..=3),
        steps in 0usize..40,
    ) {
        let config = StepperConfig::default().with_memoise(true);
        let input = LcsInput::new(&first, &second).unwrap();
        let mut tree = CallTree::prepared(LongestCommonSubsequence, input, &config).unwrap();
        advance(&mut tree, steps);
        check_round_trips(&mut tree)?;
    }
}

#[test]
fn test_full_back_restores_initial_state() {
    init_tracing();
    let config = StepperConfig::default().with_memoise(true);
    let mut tree =
        CallTree::prepared(Fibonacci, FibonacciInput::new(6).unwrap(), &config).unwrap();
    let initial = tree.snapshot();

    let steps = step_to_end(&mut tree).len();
    assert_eq!(back_to_start(&mut tree), steps);
    assert_eq!(tree.snapshot(), initial);
    assert_eq!(tree.call_count(), 1);
}

#[test]
fn test_back_order_mirrors_step_order() {
    let mut tree = CallTree::new(MergeSort, MergeSortInput::new(&[4, 3, 2, 1]).unwrap());
    let root = tree.root();
    let forward = step_to_end(&mut tree);

    let mut backward = Vec::new();
    while let Some(call) = tree.previous(root) {
        backward.push(common::path(&tree, call));
        tree.back(root);
    }
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_reset_leaves_gaps_that_step_fills_first() {
    let mut tree = CallTree::new(Fibonacci, FibonacciInput::new(5).unwrap());
    let initial = tree.snapshot();
    let root = tree.root();
    solve_by_stepping(&mut tree);
    let solved = tree.snapshot();

    let first_first = CallPath::from_names(["First Summand", "First Summand"]);
    tree.reset(at(&tree, &["First Summand", "First Summand"]));

    // `step` works on the earliest unsolved call while `back` still starts
    // from the last call in reverse order, which the reset left solved.
    let next = tree.next(root).map(|call| path(&tree, call));
    let previous = tree.previous(root).map(|call| path(&tree, call));
    assert_eq!(next, Some(first_first.clone()));
    assert_eq!(previous, Some(CallPath::from_names(["Second Summand"])));

    let stepped = tree.step(root).map(|call| path(&tree, call));
    assert_eq!(stepped, Some(first_first));
    let undone = tree.back(root).map(|call| path(&tree, call));
    assert_eq!(undone, Some(CallPath::from_names(["Second Summand"])));

    // Stepping to the end closes the gaps, after which `back` retraces a
    // plain run all the way to the initial state.
    step_to_end(&mut tree);
    assert_eq!(tree.snapshot(), solved);
    back_to_start(&mut tree);
    assert_eq!(tree.snapshot(), initial);
}

#[test]
fn test_subtree_stepped_ahead_is_undone_first() {
    let mut tree = CallTree::new(Fibonacci, FibonacciInput::new(4).unwrap());
    let root = tree.root();
    tree.step(root);
    let second = at(&tree, &["Second Summand"]);
    tree.conquer(second).unwrap();

    // The first summand is next forwards, the second is next backwards.
    let next = tree.next(root).map(|call| path(&tree, call));
    assert_eq!(next, Some(CallPath::from_names(["First Summand"])));
    assert_eq!(tree.previous(root), Some(second));

    step_to_end(&mut tree);
    let mut plain = CallTree::new(Fibonacci, FibonacciInput::new(4).unwrap());
    solve_by_stepping(&mut plain);
    assert_eq!(tree.snapshot(), plain.snapshot());
}
