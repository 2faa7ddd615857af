// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Merge sort.
//!
//! Splits the list at `len / 2`, sorts both halves, and merges them. The
//! merge takes from the left half only when its head is strictly smaller,
//! so equal elements are taken from the right first.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{Colour, NumberList, NumberValue, Value};
use std::collections::VecDeque;

const LEFT: &str = "Left";
const RIGHT: &str = "Right";

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

#[derive(Debug, Clone, PartialEq)]
pub struct MergeSortInput {
    pub array: NumberList,
}

impl MergeSortInput {
    pub fn new(values: &[i64]) -> Result<Self, InputError> {
        if values.is_empty() {
            return Err(InputError::EmptyArray);
        }
        Ok(Self {
            array: NumberList::from_raw(values),
        })
    }
}

impl Value for MergeSortInput {
    fn copy_default(&self) -> Self {
        Self {
            array: self.array.copy_default(),
        }
    }
}

impl Algorithm for MergeSort {
    type Input = MergeSortInput;
    type Output = NumberList;
    type Divide = MergeCase;
    type Base = SingletonCase;

    fn case(&self, input: &MergeSortInput) -> Case<MergeCase, SingletonCase> {
        if input.array.len() <= 1 {
            Case::Base(SingletonCase)
        } else {
            Case::Divide(MergeCase)
        }
    }

    fn undivided_details(&self, input: &MergeSortInput) -> CallDetails {
        vec![
            CallDetailsStep::new("We want to sort the array using Merge Sort.")
                .keyframe(Keyframe::new().with("Array", input.array.copy_default())),
        ]
    }
}

/// Merge two sorted lists, recording the state after each element moves.
fn merge(left: &NumberList, right: &NumberList) -> (NumberList, Vec<Keyframe>) {
    let mut left: VecDeque<NumberValue> = left.iter().map(Value::copy_default).collect();
    let mut right: VecDeque<NumberValue> = right.iter().map(Value::copy_default).collect();
    let mut merged: Vec<NumberValue> = Vec::with_capacity(left.len() + right.len());

    let frame = |merged: &[NumberValue],
                 left: &VecDeque<NumberValue>,
                 right: &VecDeque<NumberValue>| {
        Keyframe::new()
            .with(
                "Merged",
                NumberList::new(merged.to_vec()).coloured(Colour::Green),
            )
            .with(
                "Left",
                left.iter().copied().collect::<NumberList>().coloured(Colour::Blue),
            )
            .with(
                "Right",
                right.iter().copied().collect::<NumberList>().coloured(Colour::Red),
            )
    };
    let mut keyframes = vec![frame(&merged, &left, &right)];

    loop {
        let take_left = match (left.front(), right.front()) {
            (Some(l), Some(r)) => l.value < r.value,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left {
            left.pop_front()
        } else {
            right.pop_front()
        };
        merged.extend(next);
        keyframes.push(frame(&merged, &left, &right));
    }
    (NumberList::new(merged), keyframes)
}

/// Sort both halves, then merge.
#[derive(Debug, Clone, Copy)]
pub struct MergeCase;

impl DivideCase<MergeSort> for MergeCase {
    fn divide(&self, input: &MergeSortInput) -> Vec<(String, MergeSortInput)> {
        let len = input.array.len();
        let mid = len / 2;
        vec![
            (
                LEFT.to_string(),
                MergeSortInput {
                    array: input.array.slice(0..mid),
                },
            ),
            (
                RIGHT.to_string(),
                MergeSortInput {
                    array: input.array.slice(mid..len),
                },
            ),
        ]
    }

    fn combine(&self, _input: &MergeSortInput, subcalls: &Subcalls<'_, MergeSort>) -> NumberList {
        merge(subcalls.result(LEFT), subcalls.result(RIGHT)).0
    }

    fn divided_details(
        &self,
        _input: &MergeSortInput,
        subcalls: &Subcalls<'_, MergeSort>,
    ) -> CallDetails {
        let left = subcalls.input(LEFT).array.copy_default().coloured(Colour::Blue);
        let right = subcalls.input(RIGHT).array.copy_default().coloured(Colour::Red);
        vec![CallDetailsStep::new("We split the array into two halves.")
            .keyframe(Keyframe::new().with("Left", left).with("Right", right))]
    }

    fn solved_details(
        &self,
        _input: &MergeSortInput,
        subcalls: &Subcalls<'_, MergeSort>,
        _result: &NumberList,
    ) -> CallDetails {
        let (_, keyframes) = merge(subcalls.result(LEFT), subcalls.result(RIGHT));
        vec![CallDetailsStep::new("We merge the two sorted halves in O(n) time.")
            .highlight(&[LEFT, RIGHT])
            .keyframes(keyframes)]
    }
}

/// A list of at most one element is already sorted.
#[derive(Debug, Clone, Copy)]
pub struct SingletonCase;

impl BaseCase<MergeSort> for SingletonCase {
    fn solve(&self, input: &MergeSortInput) -> NumberList {
        input.array.copy_default()
    }

    fn divided_details(&self, input: &MergeSortInput) -> CallDetails {
        vec![CallDetailsStep::new(
            "The array has only one element, so it is already sorted. This is our base case.",
        )
        .keyframe(Keyframe::new().with("Array", input.array.copy_default().coloured(Colour::Gray)))]
    }

    fn solved_details(&self, _input: &MergeSortInput, result: &NumberList) -> CallDetails {
        vec![CallDetailsStep::new("We return the array.")
            .keyframe(Keyframe::new().with("Array", result.copy_default().coloured(Colour::Gray)))]
    }
}
