// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Karatsuba multiplication.
//!
//! Splitting `x = a·10^h + b` and `y = c·10^h + d`, the product is
//! `ac·10^2h + ((a+b)(c+d) - ac - bd)·10^h + bd`, which needs three
//! recursive products instead of four.

use crate::details::{CallDetails, CallDetailsStep, Keyframe};
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::error::InputError;
use crate::values::{NumberValue, Value};

const AC: &str = "ac";
const BD: &str = "bd";
const SUMS: &str = "(a+b)(c+d)";

#[derive(Debug, Clone, Copy, Default)]
pub struct Karatsuba;

#[derive(Debug, Clone, PartialEq)]
pub struct KaratsubaInput {
    pub x: NumberValue,
    pub y: NumberValue,
}

impl KaratsubaInput {
    /// Operands must be below this bound.
    pub const LIMIT: i64 = 10_000_000;

    pub fn new(x: i64, y: i64) -> Result<Self, InputError> {
        if x < 0 || y < 0 {
            return Err(InputError::Negative);
        }
        if x >= Self::LIMIT || y >= Self::LIMIT {
            return Err(InputError::OperandTooLarge { limit: Self::LIMIT });
        }
        Ok(Self::unchecked(x, y))
    }

    fn unchecked(x: i64, y: i64) -> Self {
        Self {
            x: NumberValue::new(x),
            y: NumberValue::new(y),
        }
    }

    fn split(&self) -> Split {
        Split::new(self.x.value, self.y.value)
    }
}

impl Value for KaratsubaInput {
    fn copy_default(&self) -> Self {
        Self::unchecked(self.x.value, self.y.value)
    }
}

fn digits(mut value: i64) -> u32 {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

/// The halves of both operands around `10^half`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    half: u32,
    a: i64,
    b: i64,
    c: i64,
    d: i64,
}

impl Split {
    fn new(x: i64, y: i64) -> Self {
        let half = digits(x).max(digits(y)) / 2;
        let divisor = 10_i64.pow(half);
        Self {
            half,
            a: x / divisor,
            b: x % divisor,
            c: y / divisor,
            d: y % divisor,
        }
    }

    fn divisor(&self) -> i64 {
        10_i64.pow(self.half)
    }

    /// Terms of the recombination: `ac·10^2h`, `(ad+bc)·10^h` and `ad+bc`.
    fn terms(&self, ac: i64, bd: i64, sums: i64) -> (i64, i64, i64) {
        let cross = sums - ac - bd;
        let divisor = self.divisor();
        (ac * divisor * divisor, cross * divisor, cross)
    }
}

fn keyframe(pairs: &[(&str, i64)]) -> Keyframe {
    pairs
        .iter()
        .fold(Keyframe::new(), |frame, (name, value)| {
            frame.with(*name, NumberValue::new(*value))
        })
}

impl Algorithm for Karatsuba {
    type Input = KaratsubaInput;
    type Output = NumberValue;
    type Divide = SplitCase;
    type Base = DirectProduct;

    fn case(&self, input: &KaratsubaInput) -> Case<SplitCase, DirectProduct> {
        if input.x.value < 10 || input.y.value < 10 {
            Case::Base(DirectProduct)
        } else {
            Case::Divide(SplitCase)
        }
    }

    fn undivided_details(&self, input: &KaratsubaInput) -> CallDetails {
        vec![CallDetailsStep::new(
            "We want to multiply two numbers x and y using Karatsuba's algorithm.",
        )
        .keyframe(keyframe(&[("x", input.x.value), ("y", input.y.value)]))]
    }
}

/// Three half-size products, recombined.
#[derive(Debug, Clone, Copy)]
pub struct SplitCase;

impl DivideCase<Karatsuba> for SplitCase {
    fn divide(&self, input: &KaratsubaInput) -> Vec<(String, KaratsubaInput)> {
        let Split { a, b, c, d, .. } = input.split();
        vec![
            (AC.to_string(), KaratsubaInput::unchecked(a, c)),
            (BD.to_string(), KaratsubaInput::unchecked(b, d)),
            (SUMS.to_string(), KaratsubaInput::unchecked(a + b, c + d)),
        ]
    }

    fn combine(&self, input: &KaratsubaInput, subcalls: &Subcalls<'_, Karatsuba>) -> NumberValue {
        let ac = subcalls.result(AC).value;
        let bd = subcalls.result(BD).value;
        let (high, middle, _) = input.split().terms(ac, bd, subcalls.result(SUMS).value);
        NumberValue::new(high + middle + bd)
    }

    fn divided_details(
        &self,
        input: &KaratsubaInput,
        _subcalls: &Subcalls<'_, Karatsuba>,
    ) -> CallDetails {
        let (x, y) = (input.x.value, input.y.value);
        let Split { a, b, c, d, .. } = input.split();
        vec![
            CallDetailsStep::new(
                "We divide x and y into two halves each: a and b for x, c and d for y.",
            )
            .keyframe(keyframe(&[("x", x), ("y", y)])),
            CallDetailsStep::new("a is the left half and b is the right half of x.")
                .keyframe(keyframe(&[("x", x), ("a", a), ("b", b)])),
            CallDetailsStep::new("c is the left half and d is the right half of y.")
                .keyframe(keyframe(&[("y", y), ("c", c), ("d", d)])),
            CallDetailsStep::new("We recursively calculate ac, bd, and (a+b)(c+d).")
                .keyframe(keyframe(&[("a", a), ("b", b), ("c", c), ("d", d)]))
                .highlight(&[AC, BD, SUMS]),
        ]
    }

    fn solved_details(
        &self,
        input: &KaratsubaInput,
        subcalls: &Subcalls<'_, Karatsuba>,
        result: &NumberValue,
    ) -> CallDetails {
        let ac = subcalls.result(AC).value;
        let bd = subcalls.result(BD).value;
        let sums = subcalls.result(SUMS).value;
        let (high, middle, cross) = input.split().terms(ac, bd, sums);
        vec![
            CallDetailsStep::new("We have calculated ac, bd, and (a+b)(c+d).")
                .keyframe(keyframe(&[(AC, ac), (BD, bd), (SUMS, sums)]))
                .highlight(&[AC, BD, SUMS]),
            CallDetailsStep::new(
                "We calculate (ad + bc) by subtracting ac and bd from (a+b)(c+d).",
            )
            .keyframe(keyframe(&[(SUMS, sums), (AC, ac), (BD, bd), ("ad + bc", cross)])),
            CallDetailsStep::new("We combine the results of our subcalls to get the final result.")
                .keyframe(keyframe(&[
                    ("Result", result.value),
                    ("ac * 10^(2n)", high),
                    ("(ad + bc) * 10^n", middle),
                    (BD, bd),
                ])),
        ]
    }
}

/// One operand has a single digit: multiply directly.
#[derive(Debug, Clone, Copy)]
pub struct DirectProduct;

impl BaseCase<Karatsuba> for DirectProduct {
    fn solve(&self, input: &KaratsubaInput) -> NumberValue {
        NumberValue::new(input.x.value * input.y.value)
    }

    fn divided_details(&self, input: &KaratsubaInput) -> CallDetails {
        vec![CallDetailsStep::new(
            "One of the numbers has only one digit, so we can multiply them directly.",
        )
        .keyframe(keyframe(&[("x", input.x.value), ("y", input.y.value)]))]
    }

    fn solved_details(&self, input: &KaratsubaInput, result: &NumberValue) -> CallDetails {
        vec![
            CallDetailsStep::new("We return the product of the two numbers.").keyframe(keyframe(
                &[
                    ("Product", result.value),
                    ("x", input.x.value),
                    ("y", input.y.value),
                ],
            )),
        ]
    }
}
