// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Quicksort with the middle element as pivot.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{Colour, NumberList, NumberValue, Value};

const LEFT: &str = "Left";
const RIGHT: &str = "Right";

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

#[derive(Debug, Clone, PartialEq)]
pub struct QuickSortInput {
    pub array: NumberList,
}

impl QuickSortInput {
    pub fn new(values: &[i64]) -> Result<Self, InputError> {
        if values.is_empty() {
            return Err(InputError::EmptyArray);
        }
        Ok(Self {
            array: NumberList::from_raw(values),
        })
    }

    fn pivot_index(&self) -> usize {
        self.array.len() / 2
    }

    fn pivot(&self) -> NumberValue {
        self.array.values[self.pivot_index()].copy_default()
    }

    /// Elements other than the pivot, split into `<= pivot` and `> pivot`.
    fn partition(&self) -> (NumberList, NumberList) {
        let pivot_index = self.pivot_index();
        let pivot = self.pivot().value;
        let (left, right): (Vec<_>, Vec<_>) = self
            .array
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pivot_index)
            .map(|(_, value)| value.copy_default())
            .partition(|value| value.value <= pivot);
        (NumberList::new(left), NumberList::new(right))
    }
}

impl Value for QuickSortInput {
    fn copy_default(&self) -> Self {
        Self {
            array: self.array.copy_default(),
        }
    }
}

impl Algorithm for QuickSort {
    type Input = QuickSortInput;
    type Output = NumberList;
    type Divide = PartitionCase;
    type Base = SortedCase;

    fn case(&self, input: &QuickSortInput) -> Case<PartitionCase, SortedCase> {
        if input.array.len() <= 1 {
            Case::Base(SortedCase)
        } else {
            Case::Divide(PartitionCase)
        }
    }

    fn undivided_details(&self, input: &QuickSortInput) -> CallDetails {
        vec![
            CallDetailsStep::new("We want to sort the given array using QuickSort.")
                .keyframe(Keyframe::new().with("Array", input.array.copy_default())),
        ]
    }
}

/// Partition around the pivot, sort both sides, and concatenate.
#[derive(Debug, Clone, Copy)]
pub struct PartitionCase;

impl DivideCase<QuickSort> for PartitionCase {
    fn divide(&self, input: &QuickSortInput) -> Vec<(String, QuickSortInput)> {
        let (left, right) = input.partition();
        vec![
            (LEFT.to_string(), QuickSortInput { array: left }),
            (RIGHT.to_string(), QuickSortInput { array: right }),
        ]
    }

    fn combine(&self, input: &QuickSortInput, subcalls: &Subcalls<'_, QuickSort>) -> NumberList {
        subcalls
            .result(LEFT)
            .iter()
            .copied()
            .chain(std::iter::once(input.pivot()))
            .chain(subcalls.result(RIGHT).iter().copied())
            .map(|value| value.copy_default())
            .collect()
    }

    fn divided_details(
        &self,
        input: &QuickSortInput,
        _subcalls: &Subcalls<'_, QuickSort>,
    ) -> CallDetails {
        let pivot_index = input.pivot_index();
        let pivot = input.pivot();
        let frame = |remaining: &[NumberValue], left: &[NumberValue], right: &[NumberValue]| {
            Keyframe::new()
                .with("Array", NumberList::new(remaining.to_vec()))
                .with("Pivot", pivot.coloured(Colour::Purple))
                .with("Left", NumberList::new(left.to_vec()).coloured(Colour::Blue))
                .with("Right", NumberList::new(right.to_vec()).coloured(Colour::Red))
        };

        let values: Vec<NumberValue> = input.array.iter().map(Value::copy_default).collect();
        let mut left: Vec<NumberValue> = Vec::new();
        let mut right: Vec<NumberValue> = Vec::new();
        let mut keyframes = vec![frame(&values, &left, &right)];
        for (i, value) in values.iter().enumerate() {
            if i != pivot_index {
                if value.value <= pivot.value {
                    left.push(*value);
                } else {
                    right.push(*value);
                }
            }
            keyframes.push(frame(&values[i + 1..], &left, &right));
        }

        vec![CallDetailsStep::new(format!(
            "We choose the middle element {} as the pivot and partition the array into two subarrays.",
            pivot
        ))
        .keyframes(keyframes)]
    }

    fn solved_details(
        &self,
        input: &QuickSortInput,
        subcalls: &Subcalls<'_, QuickSort>,
        _result: &NumberList,
    ) -> CallDetails {
        let pivot = input.pivot().coloured(Colour::Purple);
        let used_pivot = input.pivot().struck_through(true);
        let left: Vec<NumberValue> = subcalls
            .result(LEFT)
            .iter()
            .map(Value::copy_default)
            .collect();
        let right: Vec<NumberValue> = subcalls
            .result(RIGHT)
            .iter()
            .map(Value::copy_default)
            .collect();

        let frame = |sorted: &[NumberValue],
                     pivot: NumberValue,
                     left: &[NumberValue],
                     right: &[NumberValue]| {
            Keyframe::new()
                .with("Sorted", NumberList::new(sorted.to_vec()).coloured(Colour::Green))
                .with("Pivot", pivot)
                .with("Left", NumberList::new(left.to_vec()).coloured(Colour::Blue))
                .with("Right", NumberList::new(right.to_vec()).coloured(Colour::Red))
        };

        let mut sorted: Vec<NumberValue> = Vec::new();
        let mut keyframes = vec![frame(&sorted, pivot, &left, &right)];
        for (i, value) in left.iter().enumerate() {
            sorted.push(*value);
            keyframes.push(frame(&sorted, pivot, &left[i + 1..], &right));
        }
        sorted.push(pivot);
        keyframes.push(frame(&sorted, used_pivot, &[], &right));
        for (i, value) in right.iter().enumerate() {
            sorted.push(*value);
            keyframes.push(frame(&sorted, used_pivot, &[], &right[i + 1..]));
        }

        vec![CallDetailsStep::new(
            "We concatenate the sorted left subarray, the pivot, and the sorted right subarray to get the final sorted array.",
        )
        .highlight(&[LEFT, RIGHT])
        .keyframes(keyframes)]
    }
}

/// A list of at most one element is already sorted.
#[derive(Debug, Clone, Copy)]
pub struct SortedCase;

impl BaseCase<QuickSort> for SortedCase {
    fn solve(&self, input: &QuickSortInput) -> NumberList {
        input.array.copy_default()
    }

    fn divided_details(&self, input: &QuickSortInput) -> CallDetails {
        vec![
            CallDetailsStep::new("The array has 1 or fewer elements, so it is already sorted.")
                .keyframe(Keyframe::new().with(
                    "Array",
                    input.array.copy_default().coloured(Colour::Green),
                )),
        ]
    }

    fn solved_details(&self, _input: &QuickSortInput, result: &NumberList) -> CallDetails {
        vec![CallDetailsStep::new("The array is already sorted.")
            .keyframe(Keyframe::new().with("Array", result.copy_default().coloured(Colour::Green)))]
    }
}
