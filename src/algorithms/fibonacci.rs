// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Naive recursive Fibonacci.
//!
//! `F(1) = F(2) = 1` and `F(n) = F(n-1) + F(n-2)`. Without memoisation the
//! tree repeats the same subproblems exponentially often, which makes it the
//! canonical demonstration of memoised redirection.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{NumberValue, Value};

const FIRST: &str = "First Summand";
const SECOND: &str = "Second Summand";

/// Computes the `n`th Fibonacci number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fibonacci;

#[derive(Debug, Clone, PartialEq)]
pub struct FibonacciInput {
    pub n: NumberValue,
}

impl FibonacciInput {
    /// Largest index accepted from a user.
    pub const MAX_N: i64 = 10;

    pub fn new(n: i64) -> Result<Self, InputError> {
        if n < 1 {
            return Err(InputError::NonPositive);
        }
        if n > Self::MAX_N {
            return Err(InputError::TooLarge { max: Self::MAX_N });
        }
        Ok(Self {
            n: NumberValue::new(n),
        })
    }
}

impl Value for FibonacciInput {
    fn copy_default(&self) -> Self {
        Self {
            n: self.n.copy_default(),
        }
    }
}

fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn n_keyframe(n: i64) -> Keyframe {
    Keyframe::new().with("N", NumberValue::new(n))
}

impl Algorithm for Fibonacci {
    type Input = FibonacciInput;
    type Output = NumberValue;
    type Divide = SumCase;
    type Base = FibonacciBase;

    fn case(&self, input: &FibonacciInput) -> Case<SumCase, FibonacciBase> {
        if input.n.value <= 2 {
            Case::Base(FibonacciBase)
        } else {
            Case::Divide(SumCase)
        }
    }

    fn undivided_details(&self, input: &FibonacciInput) -> CallDetails {
        let n = input.n.value;
        vec![CallDetailsStep::new(format!(
            "We want to compute the {} Fibonacci number.",
            ordinal(n)
        ))
        .keyframe(n_keyframe(n))]
    }

    fn is_memoisable(&self) -> bool {
        true
    }
}

/// `F(n) = F(n-1) + F(n-2)`.
#[derive(Debug, Clone, Copy)]
pub struct SumCase;

impl DivideCase<Fibonacci> for SumCase {
    fn divide(&self, input: &FibonacciInput) -> Vec<(String, FibonacciInput)> {
        let n = input.n.value;
        vec![
            (
                FIRST.to_string(),
                FibonacciInput {
                    n: NumberValue::new(n - 1),
                },
            ),
            (
                SECOND.to_string(),
                FibonacciInput {
                    n: NumberValue::new(n - 2),
                },
            ),
        ]
    }

    fn combine(&self, _input: &FibonacciInput, subcalls: &Subcalls<'_, Fibonacci>) -> NumberValue {
        NumberValue::new(subcalls.result(FIRST).value + subcalls.result(SECOND).value)
    }

    fn divided_details(
        &self,
        input: &FibonacciInput,
        _subcalls: &Subcalls<'_, Fibonacci>,
    ) -> CallDetails {
        let n = input.n.value;
        vec![CallDetailsStep::new(format!(
            "{} is greater than 2, so we break this down as Fibonacci({}) + Fibonacci({}).",
            n,
            n - 1,
            n - 2
        ))
        .keyframe(n_keyframe(n))]
    }

    fn solved_details(
        &self,
        input: &FibonacciInput,
        subcalls: &Subcalls<'_, Fibonacci>,
        result: &NumberValue,
    ) -> CallDetails {
        let n = input.n.value;
        vec![CallDetailsStep::new(format!(
            "We sum Fibonacci({}) and Fibonacci({}) to find Fibonacci({}).",
            n - 1,
            n - 2,
            n
        ))
        .highlight(&[FIRST, SECOND])
        .keyframe(
            Keyframe::new()
                .with(format!("Fibonacci({})", n), result.copy_default())
                .with(format!("Fibonacci({})", n - 1), *subcalls.result(FIRST))
                .with(format!("Fibonacci({})", n - 2), *subcalls.result(SECOND)),
        )]
    }
}

/// `F(1) = F(2) = 1`.
#[derive(Debug, Clone, Copy)]
pub struct FibonacciBase;

impl BaseCase<Fibonacci> for FibonacciBase {
    fn solve(&self, _input: &FibonacciInput) -> NumberValue {
        NumberValue::new(1)
    }

    fn divided_details(&self, input: &FibonacciInput) -> CallDetails {
        let n = input.n.value;
        vec![CallDetailsStep::new(format!(
            "{} is less than or equal to 2. This is our base case.",
            n
        ))
        .keyframe(n_keyframe(n))]
    }

    fn solved_details(&self, _input: &FibonacciInput, result: &NumberValue) -> CallDetails {
        vec![CallDetailsStep::new("We return 1.")
            .keyframe(Keyframe::new().with("Result", result.copy_default()))]
    }
}
