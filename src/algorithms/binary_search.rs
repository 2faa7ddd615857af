// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Binary search over a sorted list.
//!
//! Each call looks at the middle element and either finds the target there
//! or continues in the one half that could still hold it. The result is the
//! target's index in the list the search started from, or `-1` when it is absent.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{Colour, NumberList, NumberValue, Value};

const LEFT: &str = "Left";
const RIGHT: &str = "Right";

/// Result for a target that is not in the list.
pub const NOT_FOUND: i64 = -1;

#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

#[derive(Debug, Clone, PartialEq)]
pub struct BinarySearchInput {
    pub array: NumberList,
    pub target: NumberValue,
    /// Index of `array[0]` within the list the search started from.
    pub offset: NumberValue,
}

impl BinarySearchInput {
    pub fn new(values: &[i64], target: i64) -> Result<Self, InputError> {
        if values.is_empty() {
            return Err(InputError::EmptyArray);
        }
        let array = NumberList::from_raw(values);
        if !array.is_sorted() {
            return Err(InputError::UnsortedArray);
        }
        Ok(Self {
            array,
            target: NumberValue::new(target),
            offset: NumberValue::new(0),
        })
    }

    fn middle(&self) -> usize {
        self.array.len() / 2
    }

    fn middle_value(&self) -> NumberValue {
        self.array.values[self.middle()].copy_default()
    }

    /// Index of the middle element in the list the search started from.
    fn middle_index(&self) -> i64 {
        self.offset.value + self.middle() as i64
    }

    /// The half to continue in, or `None` if that half is empty.
    fn next_half(&self) -> Option<(&'static str, BinarySearchInput)> {
        let middle = self.middle();
        let len = self.array.len();
        let (name, range, offset) = if self.middle_value().value < self.target.value {
            (RIGHT, middle + 1..len, self.middle_index() + 1)
        } else {
            (LEFT, 0..middle, self.offset.value)
        };
        if range.is_empty() {
            return None;
        }
        Some((
            name,
            BinarySearchInput {
                array: self.array.slice(range),
                target: self.target.copy_default(),
                offset: NumberValue::new(offset),
            },
        ))
    }

    fn target_keyframe(&self) -> NumberValue {
        self.target.copy_default().coloured(Colour::Green)
    }
}

impl Value for BinarySearchInput {
    fn copy_default(&self) -> Self {
        Self {
            array: self.array.copy_default(),
            target: self.target.copy_default(),
            offset: self.offset.copy_default(),
        }
    }
}

/// The list with only position `keep` highlighted and the rest struck out.
fn only_position(array: &NumberList, keep: Option<usize>) -> NumberList {
    array
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let kept = Some(i) == keep;
            value
                .copy_default()
                .coloured(if kept { Colour::Green } else { Colour::Gray })
                .struck_through(!kept)
        })
        .collect()
}

impl Algorithm for BinarySearch {
    type Input = BinarySearchInput;
    type Output = NumberValue;
    type Divide = HalveCase;
    type Base = SearchBase;

    fn case(&self, input: &BinarySearchInput) -> Case<HalveCase, SearchBase> {
        if input.middle_value() == input.target {
            return Case::Base(SearchBase::Found);
        }
        if input.array.len() == 1 || input.next_half().is_none() {
            return Case::Base(SearchBase::Unfound);
        }
        Case::Divide(HalveCase)
    }

    fn undivided_details(&self, input: &BinarySearchInput) -> CallDetails {
        vec![CallDetailsStep::new(format!(
            "We want to find the index of the target value {} in the array.",
            input.target
        ))
        .keyframe(
            Keyframe::new()
                .with("Array", input.array.copy_default())
                .with("Target", input.target.copy_default()),
        )]
    }
}

/// Discard the half that cannot hold the target.
#[derive(Debug, Clone, Copy)]
pub struct HalveCase;

impl DivideCase<BinarySearch> for HalveCase {
    fn divide(&self, input: &BinarySearchInput) -> Vec<(String, BinarySearchInput)> {
        input
            .next_half()
            .map(|(name, half)| (name.to_string(), half))
            .into_iter()
            .collect()
    }

    fn combine(
        &self,
        _input: &BinarySearchInput,
        subcalls: &Subcalls<'_, BinarySearch>,
    ) -> NumberValue {
        subcalls.first_result().copy_default()
    }

    fn divided_details(
        &self,
        input: &BinarySearchInput,
        _subcalls: &Subcalls<'_, BinarySearch>,
    ) -> CallDetails {
        let middle = input.middle();
        let midpoint = input.middle_value().coloured(Colour::Red);
        let checking: NumberList = input
            .array
            .iter()
            .enumerate()
            .map(|(i, value)| {
                value
                    .copy_default()
                    .coloured(if i == middle { Colour::Red } else { Colour::Gray })
            })
            .collect();

        let go_right = midpoint.value < input.target.value;
        let discarded = |i: usize| if go_right { i < middle } else { i > middle };
        let halved: NumberList = input
            .array
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let colour = if i == middle {
                    Colour::Red
                } else if discarded(i) {
                    Colour::Gray
                } else {
                    Colour::Blue
                };
                value
                    .copy_default()
                    .coloured(colour)
                    .struck_through(discarded(i))
            })
            .collect();
        let decision = if go_right {
            format!(
                "The target value {} is greater than the midpoint value. We discard the left half of the array.",
                input.target
            )
        } else {
            format!(
                "The target value {} is less than the midpoint value. We discard the right half of the array.",
                input.target
            )
        };

        vec![
            CallDetailsStep::new(format!(
                "We check the element at the middle of the array. The value is {}.",
                midpoint
            ))
            .keyframe(
                Keyframe::new()
                    .with("Array", checking)
                    .with("Midpoint", midpoint),
            ),
            CallDetailsStep::new(decision).keyframe(
                Keyframe::new()
                    .with("Array", halved)
                    .with("Target", input.target_keyframe())
                    .with("Midpoint", midpoint),
            ),
        ]
    }

    fn solved_details(
        &self,
        input: &BinarySearchInput,
        subcalls: &Subcalls<'_, BinarySearch>,
        result: &NumberValue,
    ) -> CallDetails {
        let names: Vec<&str> = subcalls.names().collect();
        if result.value == NOT_FOUND {
            return vec![CallDetailsStep::new(format!(
                "The target value {} was not found in the array.",
                input.target
            ))
            .highlight(&names)
            .keyframe(
                Keyframe::new()
                    .with("Array", only_position(&input.array, None))
                    .with("Target", input.target_keyframe()),
            )];
        }
        let local = usize::try_from(result.value - input.offset.value).ok();
        vec![CallDetailsStep::new(format!("We return the index {}.", result))
            .highlight(&names)
            .keyframe(
                Keyframe::new()
                    .with("Index", result.copy_default().coloured(Colour::Green))
                    .with("Array", only_position(&input.array, local))
                    .with("Target", input.target_keyframe()),
            )]
    }
}

/// Terminal outcomes of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBase {
    /// The middle element is the target.
    Found,
    /// No element left that could be the target.
    Unfound,
}

impl BaseCase<BinarySearch> for SearchBase {
    fn solve(&self, input: &BinarySearchInput) -> NumberValue {
        match self {
            SearchBase::Found => NumberValue::new(input.middle_index()),
            SearchBase::Unfound => NumberValue::new(NOT_FOUND),
        }
    }

    fn divided_details(&self, input: &BinarySearchInput) -> CallDetails {
        match self {
            SearchBase::Found => vec![CallDetailsStep::new(format!(
                "The target value {} matches the element at the middle. We have found the target at index {}.",
                input.target,
                input.middle_index()
            ))
            .keyframe(
                Keyframe::new()
                    .with("Array", only_position(&input.array, Some(input.middle())))
                    .with("Target", input.target_keyframe()),
            )],
            SearchBase::Unfound => vec![CallDetailsStep::new(
                "None of the remaining values can match our target.",
            )
            .keyframe(
                Keyframe::new()
                    .with("Array", only_position(&input.array, None))
                    .with("Target", input.target_keyframe()),
            )],
        }
    }

    fn solved_details(&self, input: &BinarySearchInput, result: &NumberValue) -> CallDetails {
        match self {
            SearchBase::Found => vec![CallDetailsStep::new(format!(
                "We return the index {}.",
                result
            ))
            .keyframe(
                Keyframe::new()
                    .with("Index", result.copy_default().coloured(Colour::Green))
                    .with("Array", only_position(&input.array, Some(input.middle())))
                    .with("Target", input.target_keyframe()),
            )],
            SearchBase::Unfound => vec![CallDetailsStep::new(format!(
                "The target {} was not found in the array.",
                input.target
            ))
            .keyframe(
                Keyframe::new()
                    .with("Index", result.copy_default().coloured(Colour::Red))
                    .with("Array", only_position(&input.array, None))
                    .with("Target", input.target_keyframe()),
            )],
        }
    }
}
