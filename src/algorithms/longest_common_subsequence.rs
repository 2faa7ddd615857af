// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Longest common subsequence of two lists.
//!
//! Compares the last elements: if equal they end the LCS and one subproblem
//! drops both; otherwise two subproblems each drop one of them and the
//! longer answer wins. The subproblems overlap heavily, so the algorithm is
//! memoisable.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{Colour, NumberList, NumberValue, Value};

const MATCHED: &str = "Subproblem";
const DROP_FIRST: &str = "Subproblem 1";
const DROP_SECOND: &str = "Subproblem 2";

#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubsequence;

#[derive(Debug, Clone, PartialEq)]
pub struct LcsInput {
    pub first: NumberList,
    pub second: NumberList,
}

impl LcsInput {
    /// Most elements accepted across both lists.
    pub const MAX_ELEMENTS: usize = 8;

    pub fn new(first: &[i64], second: &[i64]) -> Result<Self, InputError> {
        if first.len() + second.len() > Self::MAX_ELEMENTS {
            return Err(InputError::TooManyElements {
                max: Self::MAX_ELEMENTS,
            });
        }
        Ok(Self {
            first: NumberList::from_raw(first),
            second: NumberList::from_raw(second),
        })
    }

    /// Last elements of both lists, when neither is empty.
    fn last_elements(&self) -> Option<(NumberValue, NumberValue)> {
        Some((*self.first.values.last()?, *self.second.values.last()?))
    }

    fn last_match(&self) -> bool {
        self.last_elements().is_some_and(|(a, b)| a == b)
    }

    /// `list` with all but its last element gray, the last in `colour`.
    fn mark_last(list: &NumberList, colour: Colour) -> NumberList {
        let last = list.len().saturating_sub(1);
        list.iter()
            .enumerate()
            .map(|(i, value)| {
                value
                    .copy_default()
                    .coloured(if i == last { colour } else { Colour::Gray })
            })
            .collect()
    }
}

impl Value for LcsInput {
    fn copy_default(&self) -> Self {
        Self {
            first: self.first.copy_default(),
            second: self.second.copy_default(),
        }
    }
}

/// `list` with elements that appear in `lcs` green and the rest gray.
fn mark_members(list: &NumberList, lcs: &NumberList) -> NumberList {
    list.iter()
        .map(|value| {
            let colour = if lcs.iter().any(|member| member == value) {
                Colour::Green
            } else {
                Colour::Gray
            };
            value.copy_default().coloured(colour)
        })
        .collect()
}

fn without_last(list: &NumberList) -> NumberList {
    list.slice(0..list.len().saturating_sub(1))
}

impl Algorithm for LongestCommonSubsequence {
    type Input = LcsInput;
    type Output = NumberList;
    type Divide = LastElementCase;
    type Base = EmptyCase;

    fn case(&self, input: &LcsInput) -> Case<LastElementCase, EmptyCase> {
        if input.first.is_empty() || input.second.is_empty() {
            Case::Base(EmptyCase)
        } else {
            Case::Divide(LastElementCase)
        }
    }

    fn undivided_details(&self, input: &LcsInput) -> CallDetails {
        vec![CallDetailsStep::new(
            "We want to find the longest common subsequence between the two lists.",
        )
        .keyframe(
            Keyframe::new()
                .with("First", input.first.copy_default())
                .with("Second", input.second.copy_default()),
        )]
    }

    fn is_memoisable(&self) -> bool {
        true
    }
}

/// Recurse on the lists without their last elements.
#[derive(Debug, Clone, Copy)]
pub struct LastElementCase;

impl DivideCase<LongestCommonSubsequence> for LastElementCase {
    fn divide(&self, input: &LcsInput) -> Vec<(String, LcsInput)> {
        if input.last_match() {
            return vec![(
                MATCHED.to_string(),
                LcsInput {
                    first: without_last(&input.first),
                    second: without_last(&input.second),
                },
            )];
        }
        vec![
            (
                DROP_FIRST.to_string(),
                LcsInput {
                    first: without_last(&input.first),
                    second: input.second.copy_default(),
                },
            ),
            (
                DROP_SECOND.to_string(),
                LcsInput {
                    first: input.first.copy_default(),
                    second: without_last(&input.second),
                },
            ),
        ]
    }

    fn combine(
        &self,
        input: &LcsInput,
        subcalls: &Subcalls<'_, LongestCommonSubsequence>,
    ) -> NumberList {
        match input.last_elements() {
            Some((last, _)) if input.last_match() => subcalls
                .result(MATCHED)
                .iter()
                .copied()
                .chain(std::iter::once(last))
                .map(|value| value.copy_default())
                .collect(),
            _ => {
                let dropped_first = subcalls.result(DROP_FIRST);
                let dropped_second = subcalls.result(DROP_SECOND);
                if dropped_first.len() > dropped_second.len() {
                    dropped_first.copy_default()
                } else {
                    dropped_second.copy_default()
                }
            }
        }
    }

    fn divided_details(
        &self,
        input: &LcsInput,
        subcalls: &Subcalls<'_, LongestCommonSubsequence>,
    ) -> CallDetails {
        let names: Vec<&str> = subcalls.names().collect();
        let (text, colour) = match input.last_elements() {
            Some((last, _)) if input.last_match() => (
                format!(
                    "Both final elements are equal to {}, so we include them in the LCS and solve the subproblem without these elements.",
                    last
                ),
                Colour::Green,
            ),
            _ => (
                "The last elements are not equal so we discard them and solve two subproblems, one without each last element.".to_string(),
                Colour::Red,
            ),
        };
        vec![CallDetailsStep::new(text).highlight(&names).keyframe(
            Keyframe::new()
                .with("First", LcsInput::mark_last(&input.first, colour))
                .with("Second", LcsInput::mark_last(&input.second, colour)),
        )]
    }

    fn solved_details(
        &self,
        input: &LcsInput,
        _subcalls: &Subcalls<'_, LongestCommonSubsequence>,
        result: &NumberList,
    ) -> CallDetails {
        let text = match input.last_elements() {
            Some((last, _)) if input.last_match() => format!(
                "We take the subproblem's sequence and append our common final element {}.",
                last
            ),
            _ => "The final elements of our input are not equal, so we return the longer LCS of the two subproblems.".to_string(),
        };
        vec![CallDetailsStep::new(text).keyframe(
            Keyframe::new()
                .with("LCS", result.copy_default().coloured(Colour::Green))
                .with("First", mark_members(&input.first, result))
                .with("Second", mark_members(&input.second, result)),
        )]
    }
}

/// One list is empty, so the LCS is empty.
#[derive(Debug, Clone, Copy)]
pub struct EmptyCase;

impl BaseCase<LongestCommonSubsequence> for EmptyCase {
    fn solve(&self, _input: &LcsInput) -> NumberList {
        NumberList::default()
    }

    fn divided_details(&self, input: &LcsInput) -> CallDetails {
        vec![CallDetailsStep::new(
            "One of the lists is empty, so the longest common subsequence is the empty list.",
        )
        .keyframe(
            Keyframe::new()
                .with("First", input.first.copy_default().coloured(Colour::Gray))
                .with("Second", input.second.copy_default().coloured(Colour::Gray)),
        )]
    }

    fn solved_details(&self, input: &LcsInput, result: &NumberList) -> CallDetails {
        vec![CallDetailsStep::new(
            "The longest common subsequence of an empty list and any other list is an empty list.",
        )
        .keyframe(
            Keyframe::new()
                .with("LCS", result.copy_default())
                .with("First", input.first.copy_default().coloured(Colour::Gray))
                .with("Second", input.second.copy_default().coloured(Colour::Gray)),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepperConfig;
    use crate::engine::CallTree;

    fn lcs(first: &[i64], second: &[i64]) -> Vec<i64> {
        let input = LcsInput::new(first, second).unwrap();
        let mut tree = CallTree::new(LongestCommonSubsequence, input);
        let root = tree.root();
        tree.result(root).unwrap().raw()
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            LcsInput::new(&[1, 2, 3, 4, 5], &[1, 2, 3, 4]),
            Err(InputError::TooManyElements { max: 8 })
        );
        assert!(LcsInput::new(&[], &[]).is_ok());
    }

    #[test]
    fn test_common_subsequences() {
        assert_eq!(lcs(&[1, 2, 3], &[1, 3]), vec![1, 3]);
        assert_eq!(lcs(&[1, 2], &[3, 4]), Vec::<i64>::new());
        assert_eq!(lcs(&[], &[1]), Vec::<i64>::new());
    }

    #[test]
    fn test_ties_prefer_second_subproblem() {
        // Dropping 2 from the first list leaves [1] in common; dropping 1
        // from the second leaves [2]. Equal length, so the second wins.
        assert_eq!(lcs(&[1, 2], &[2, 1]), vec![2]);
    }

    #[test]
    fn test_memoised_matches_unmemoised() {
        let input = LcsInput::new(&[1, 2, 3, 4], &[2, 4, 3, 1]).unwrap();
        let config = StepperConfig::default().with_memoise(true);
        let mut memoised =
            CallTree::prepared(LongestCommonSubsequence, input.clone(), &config).unwrap();
        let mut plain = CallTree::new(LongestCommonSubsequence, input);

        let (m, p) = (memoised.root(), plain.root());
        assert_eq!(memoised.result(m).unwrap(), plain.result(p).unwrap());
        assert!(memoised.snapshot().count(crate::state::CallStatus::Memoised) > 0);
    }
}
