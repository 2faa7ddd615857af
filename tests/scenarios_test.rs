// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Concrete traces, addressing, the details wire format and configuration.

mod common;

use common::{at, init_tracing, solve_by_stepping, step_to_end};
use proptest::prelude::*;
use recursion_stepper::algorithms::binary_search::NOT_FOUND;
use recursion_stepper::algorithms::{
    BinarySearch, BinarySearchInput, Fibonacci, FibonacciInput, Karatsuba, KaratsubaInput,
    MergeSort, MergeSortInput,
};
use recursion_stepper::engine::{Algorithm, CallPath, SubcallPosition};
use recursion_stepper::{CallError, CallStatus, CallTree, InputError, StepperConfig};
use serde_json::json;

fn paths(names: &[&[&str]]) -> Vec<CallPath> {
    names.iter().map(|names| CallPath::from(*names)).collect()
}

#[test]
fn test_merge_sort_trace() {
    init_tracing();
    let mut tree = CallTree::new(MergeSort, MergeSortInput::new(&[3, 1, 2]).unwrap());
    let trace = step_to_end(&mut tree);
    assert_eq!(
        trace,
        paths(&[
            &[],
            &["Left"],
            &["Left"],
            &["Right"],
            &["Right", "Left"],
            &["Right", "Left"],
            &["Right", "Right"],
            &["Right", "Right"],
            &["Right"],
            &[],
        ])
    );
    let root = tree.root();
    assert_eq!(tree.result(root).unwrap().raw(), vec![1, 2, 3]);
}

#[test]
fn test_binary_search_scenarios() {
    let mut found = CallTree::new(BinarySearch, BinarySearchInput::new(&[1, 3, 5, 7], 5).unwrap());
    assert_eq!(solve_by_stepping(&mut found).value, 2);
    let root = found.root();
    assert!(found.is_base_case(root));

    let mut missing =
        CallTree::new(BinarySearch, BinarySearchInput::new(&[1, 3, 5, 7], 4).unwrap());
    assert_eq!(solve_by_stepping(&mut missing).value, NOT_FOUND);
    assert_eq!(
        missing.call_from_root(&CallPath::from_names(["Left", "Right"])),
        None,
        "an empty half is never created"
    );
    assert!(missing.is_base_case(at(&missing, &["Left"])));
}

#[test]
fn test_input_validation_messages() {
    assert_eq!(
        MergeSortInput::new(&[]).unwrap_err().to_string(),
        "Please enter at least one element."
    );
    assert_eq!(
        FibonacciInput::new(11).unwrap_err(),
        InputError::TooLarge { max: 10 }
    );
    assert_eq!(
        KaratsubaInput::new(1, -1).unwrap_err().to_string(),
        "Please enter non-negative numbers."
    );
}

#[test]
fn test_subcall_positions() {
    let mut tree = CallTree::new(Karatsuba, KaratsubaInput::new(1234, 5678).unwrap());
    let root = tree.root();
    tree.divide(root).unwrap();
    let positions: Vec<SubcallPosition> = tree
        .subcall_positions(root)
        .into_iter()
        .map(|(_, position)| position)
        .collect();
    assert_eq!(
        positions,
        vec![
            SubcallPosition::Left,
            SubcallPosition::Middle,
            SubcallPosition::Right
        ]
    );
}

#[test]
fn test_discarded_calls_are_not_found() {
    let mut tree = CallTree::new(Fibonacci, FibonacciInput::new(4).unwrap());
    let root = tree.root();
    tree.step(root);
    let first = at(&tree, &["First Summand"]);
    tree.back(root);

    assert!(!tree.contains(first));
    assert_eq!(tree.path_from_root(first), None);
    assert_eq!(tree.call_from_root(&CallPath::from_names(["First Summand"])), None);
    assert_eq!(tree.divide(first), Err(CallError::UnknownCall));

    // The freed slot is reused without reviving the old handle.
    tree.step(root);
    assert!(!tree.contains(first));
    assert!(tree.contains(at(&tree, &["First Summand"])));
}

fn check_unique_addressing<A: Algorithm>(tree: &CallTree<A>) -> Result<(), TestCaseError> {
    for call in tree.all_tree_calls() {
        let path = tree.path_from_root(call);
        prop_assert!(path.is_some());
        prop_assert_eq!(tree.call_from_root(&path.unwrap()), Some(call));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn every_call_is_addressed_by_its_path(
        n in 1i64..=8,
        memoise in any::<bool>(),
        steps in 0usize..60,
    ) {
        let config = StepperConfig::default().with_memoise(memoise);
        let mut tree =
            CallTree::prepared(Fibonacci, FibonacciInput::new(n).unwrap(), &config).unwrap();
        let root = tree.root();
        for _ in 0..steps {
            if tree.step(root).is_none() {
                break;
            }
        }
        check_unique_addressing(&tree)?;

        let relative = tree.all_subcall_paths(root);
        prop_assert_eq!(relative.len(), tree.call_count());
    }

    #[test]
    fn karatsuba_calls_are_addressed_by_their_paths(x in 0i64..100_000, y in 0i64..100_000) {
        let mut tree = CallTree::new(Karatsuba, KaratsubaInput::new(x, y).unwrap());
        solve_by_stepping(&mut tree);
        check_unique_addressing(&tree)?;
    }
}

#[test]
fn test_details_wire_format() {
    let mut tree = CallTree::new(MergeSort, MergeSortInput::new(&[2, 1]).unwrap());
    let root = tree.root();

    let undivided = serde_json::to_value(tree.details(root).unwrap()).unwrap();
    assert_eq!(
        undivided,
        json!([{
            "text": "We want to sort the array using Merge Sort.",
            "valueKeyframes": [{
                "Array": {
                    "type": "List",
                    "value": {
                        "values": [
                            {"value": 2, "colour": "black", "struck": false},
                            {"value": 1, "colour": "black", "struck": false}
                        ]
                    }
                }
            }]
        }])
    );

    tree.result(root).unwrap();
    let solved = serde_json::to_value(tree.details(root).unwrap()).unwrap();
    assert_eq!(solved[0]["highlightedCalls"], json!(["Left", "Right"]));
    let keyframes = solved[0]["valueKeyframes"].as_array().unwrap();
    // Initial frame plus one per element merged.
    assert_eq!(keyframes.len(), 3);
    // Keyframes keep their names in insertion order.
    let first = tree.details(root).unwrap()[0].value_keyframes[0].clone();
    assert_eq!(first.names().collect::<Vec<_>>(), vec!["Merged", "Left", "Right"]);
    assert!(serde_json::to_string(&first).unwrap().starts_with(r#"{"Merged":"#));
}

#[test]
fn test_details_follow_memoisation() {
    let config = StepperConfig::default().with_memoise(true);
    let mut tree =
        CallTree::prepared(Fibonacci, FibonacciInput::new(4).unwrap(), &config).unwrap();
    let root = tree.root();
    tree.divide(root).unwrap();
    let second = at(&tree, &["Second Summand"]);

    let blocked = tree.details(second).unwrap();
    assert!(blocked[0].text.contains("/First Summand/First Summand"));

    solve_by_stepping(&mut tree);
    assert_eq!(tree.status(second), Some(CallStatus::Memoised));
    let memoised = tree.details(second).unwrap();
    assert!(memoised[0].text.contains("already solved"));
}

#[test]
fn test_config_from_json() {
    let config: StepperConfig =
        serde_json::from_str(r#"{"memoise": true, "max_shadow_steps": 500}"#).unwrap();
    assert_eq!(
        config,
        StepperConfig::default()
            .with_memoise(true)
            .with_max_shadow_steps(500)
    );

    let tree =
        CallTree::prepared(Fibonacci, FibonacciInput::new(10).unwrap(), &config).unwrap();
    assert!(tree.is_memoising());
    assert_eq!(tree.memo_table().len(), 10);
}

#[test]
fn test_step_limit_ignored_for_plain_algorithms() {
    let config = StepperConfig::default().with_max_shadow_steps(0);
    let tree = CallTree::prepared(MergeSort, MergeSortInput::new(&[3, 2, 1]).unwrap(), &config);
    assert!(tree.is_ok_and(|tree| tree.memo_table().is_empty()));
}
