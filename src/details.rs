// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Call details: the narrative handed to the presentation layer.
//!
//! A call's details are an ordered list of steps. Each step carries a line of
//! text, a sequence of keyframes (named value snapshots to animate between)
//! and optionally the names of subcalls to highlight. This is the only format
//! shared between the engine and whatever renders it, so it serialises to
//! plain JSON:
//!
//! ```
//! use recursion_stepper::details::{CallDetailsStep, Keyframe};
//! use recursion_stepper::values::NumberValue;
//!
//! let step = CallDetailsStep::new("We return 1.")
//!     .keyframe(Keyframe::new().with("Result", NumberValue::new(1)));
//! assert_eq!(step.value_keyframes[0].len(), 1);
//! ```

use crate::values::{NumberList, NumberValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A value shown in a keyframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum DisplayValue {
    Number(NumberValue),
    List(NumberList),
}

impl From<NumberValue> for DisplayValue {
    fn from(value: NumberValue) -> Self {
        DisplayValue::Number(value)
    }
}

impl From<NumberList> for DisplayValue {
    fn from(value: NumberList) -> Self {
        DisplayValue::List(value)
    }
}

/// Insertion-ordered mapping from display names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyframe {
    entries: Vec<(String, DisplayValue)>,
}

impl Keyframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Keyframe::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DisplayValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a named value. An existing name keeps its position and has its
    /// value replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DisplayValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DisplayValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisplayValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Keyframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One step of a call's narrative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDetailsStep {
    pub text: String,
    pub value_keyframes: Vec<Keyframe>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlighted_calls: Vec<String>,
}

impl CallDetailsStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Append a keyframe.
    pub fn keyframe(mut self, keyframe: Keyframe) -> Self {
        self.value_keyframes.push(keyframe);
        self
    }

    /// Append several keyframes in order.
    pub fn keyframes(mut self, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        self.value_keyframes.extend(keyframes);
        self
    }

    /// Highlight the named subcalls.
    pub fn highlight(mut self, names: &[&str]) -> Self {
        self.highlighted_calls
            .extend(names.iter().map(|name| name.to_string()));
        self
    }
}

/// The full narrative for one call in its current state.
pub type CallDetails = Vec<CallDetailsStep>;
