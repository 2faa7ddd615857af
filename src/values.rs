// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Value wrappers for call inputs and outputs.
//!
//! Every input and output type handled by the engine implements [`Value`]:
//! it can be cloned for snapshots, compared for memo-key equality, and copied
//! without its presentation styling via [`Value::copy_default`].
//!
//! Styling (colour, strike-through) only affects how a value is drawn. It
//! never takes part in equality, so two numbers with the same value are the
//! same memo key however they are coloured.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contract for data flowing through a call tree.
///
/// `Clone` produces a faithful copy (styling included), `PartialEq` is deep
/// value equality, and `copy_default` produces an unstyled copy.
pub trait Value: Clone + PartialEq + fmt::Debug {
    /// Copy the value with all presentation styling reset.
    fn copy_default(&self) -> Self {
        self.clone()
    }
}

/// Colours used to annotate values in call details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    #[default]
    Black,
    Gray,
    Red,
    Green,
    Blue,
    Purple,
}

/// An integer with display styling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NumberValue {
    pub value: i64,
    #[serde(default)]
    pub colour: Colour,
    #[serde(default)]
    pub struck: bool,
}

impl NumberValue {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            colour: Colour::Black,
            struck: false,
        }
    }

    /// Return this value drawn in `colour`.
    pub fn coloured(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// Return this value with strike-through set to `struck`.
    pub fn struck_through(mut self, struck: bool) -> Self {
        self.struck = struck;
        self
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for NumberValue {}

impl From<i64> for NumberValue {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Value for NumberValue {
    fn copy_default(&self) -> Self {
        Self::new(self.value)
    }
}

/// An ordered list of styled integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberList {
    pub values: Vec<NumberValue>,
}

impl NumberList {
    pub fn new(values: Vec<NumberValue>) -> Self {
        Self { values }
    }

    /// Build an unstyled list from raw integers.
    pub fn from_raw(values: &[i64]) -> Self {
        Self::new(values.iter().copied().map(NumberValue::new).collect())
    }

    /// The raw integers, styling dropped.
    pub fn raw(&self) -> Vec<i64> {
        self.values.iter().map(|v| v.value).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NumberValue> {
        self.values.iter()
    }

    /// Unstyled copy of `values[range]`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Self::new(self.values[range].iter().map(Value::copy_default).collect())
    }

    /// Return the list with every element drawn in `colour`.
    pub fn coloured(mut self, colour: Colour) -> Self {
        for value in &mut self.values {
            value.colour = colour;
        }
        self
    }

    /// Return the list with every element struck through (or not).
    pub fn struck_through(mut self, struck: bool) -> Self {
        for value in &mut self.values {
            value.struck = struck;
        }
        self
    }

    /// True when the values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0].value <= pair[1].value)
    }
}

impl FromIterator<NumberValue> for NumberList {
    fn from_iter<I: IntoIterator<Item = NumberValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for NumberList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl Value for NumberList {
    fn copy_default(&self) -> Self {
        self.values.iter().map(Value::copy_default).collect()
    }
}
