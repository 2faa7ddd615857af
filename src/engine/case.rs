// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Plug-in contract for recursive algorithms.
//!
//! An algorithm is described by three pieces:
//! - an [`Algorithm`], which decides from a call's input which case applies,
//! - a [`DivideCase`], which splits an input into named subcalls and later
//!   combines their results,
//! - a [`BaseCase`], which solves an input directly.
//!
//! The engine owns every call and drives the lifecycle; a plug-in only ever
//! sees inputs and the results of subcalls that are already available.
//!
//! # Example
//!
//! ```
//! use recursion_stepper::details::{CallDetails, CallDetailsStep};
//! use recursion_stepper::engine::{Algorithm, BaseCase, Case, CallTree, DivideCase, Subcalls};
//! use recursion_stepper::values::NumberValue;
//!
//! /// Sum of 1..=n, split as n + sum(1..=n-1).
//! struct Triangle;
//! struct Peel;
//! struct One;
//!
//! impl Algorithm for Triangle {
//!     type Input = NumberValue;
//!     type Output = NumberValue;
//!     type Divide = Peel;
//!     type Base = One;
//!
//!     fn case(&self, input: &NumberValue) -> Case<Peel, One> {
//!         if input.value <= 1 { Case::Base(One) } else { Case::Divide(Peel) }
//!     }
//!
//!     fn undivided_details(&self, input: &NumberValue) -> CallDetails {
//!         vec![CallDetailsStep::new(format!("Sum 1..={}", input))]
//!     }
//! }
//!
//! impl DivideCase<Triangle> for Peel {
//!     fn divide(&self, input: &NumberValue) -> Vec<(String, NumberValue)> {
//!         vec![("Rest".to_string(), NumberValue::new(input.value - 1))]
//!     }
//!
//!     fn combine(&self, input: &NumberValue, subcalls: &Subcalls<'_, Triangle>) -> NumberValue {
//!         NumberValue::new(input.value + subcalls.result("Rest").value)
//!     }
//!
//!     fn divided_details(&self, _: &NumberValue, _: &Subcalls<'_, Triangle>) -> CallDetails {
//!         Vec::new()
//!     }
//!
//!     fn solved_details(
//!         &self,
//!         _: &NumberValue,
//!         _: &Subcalls<'_, Triangle>,
//!         _: &NumberValue,
//!     ) -> CallDetails {
//!         Vec::new()
//!     }
//! }
//!
//! impl BaseCase<Triangle> for One {
//!     fn solve(&self, _: &NumberValue) -> NumberValue {
//!         NumberValue::new(1)
//!     }
//!
//!     fn divided_details(&self, _: &NumberValue) -> CallDetails {
//!         Vec::new()
//!     }
//!
//!     fn solved_details(&self, _: &NumberValue, _: &NumberValue) -> CallDetails {
//!         Vec::new()
//!     }
//! }
//!
//! let mut tree = CallTree::new(Triangle, NumberValue::new(4));
//! let root = tree.root();
//! assert_eq!(tree.result(root).unwrap().value, 10);
//! ```

use super::path::CallPath;
use crate::details::{CallDetails, CallDetailsStep};
use crate::values::Value;
use std::ops::Index;

/// The case selected for a call's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Case<D, B> {
    /// Non-terminal: split into subcalls, then combine.
    Divide(D),
    /// Terminal: solve directly.
    Base(B),
}

/// A recursive algorithm that can be stepped through by a [`CallTree`].
///
/// [`CallTree`]: super::CallTree
pub trait Algorithm: Sized {
    type Input: Value;
    type Output: Value;
    type Divide: DivideCase<Self>;
    type Base: BaseCase<Self>;

    /// Decide which case applies to `input`.
    fn case(&self, input: &Self::Input) -> Case<Self::Divide, Self::Base>;

    /// Narrative for a call that has not been divided yet.
    fn undivided_details(&self, input: &Self::Input) -> CallDetails;

    /// Whether repeated sub-inputs are worth redirecting to a single solution.
    fn is_memoisable(&self) -> bool {
        false
    }

    /// Narrative for a call whose result is borrowed from an equal call.
    fn memoised_details(
        &self,
        _input: &Self::Input,
        _result: &Self::Output,
        canonical: &CallPath,
    ) -> CallDetails {
        vec![CallDetailsStep::new(format!(
            "We have already solved this problem at {}, so we reuse its result.",
            canonical
        ))]
    }

    /// Narrative for a call waiting on an equal call that is not solved yet.
    fn blocked_details(&self, _input: &Self::Input, waiting_on: &CallPath) -> CallDetails {
        vec![CallDetailsStep::new(format!(
            "This problem is solved first at {}. We wait for that call before continuing here.",
            waiting_on
        ))]
    }
}

/// Non-terminal case: splits an input and combines subcall results.
pub trait DivideCase<A: Algorithm> {
    /// The named sub-inputs, in the order they are to be solved.
    ///
    /// Names must be unique within one call.
    fn divide(&self, input: &A::Input) -> Vec<(String, A::Input)>;

    /// Combine subcall results into this call's result.
    ///
    /// Only called once every subcall is solved or memoised.
    fn combine(&self, input: &A::Input, subcalls: &Subcalls<'_, A>) -> A::Output;

    /// Narrative once divided, before combining.
    fn divided_details(&self, input: &A::Input, subcalls: &Subcalls<'_, A>) -> CallDetails;

    /// Narrative once combined.
    fn solved_details(
        &self,
        input: &A::Input,
        subcalls: &Subcalls<'_, A>,
        result: &A::Output,
    ) -> CallDetails;
}

/// Terminal case: solves an input directly.
pub trait BaseCase<A: Algorithm> {
    fn solve(&self, input: &A::Input) -> A::Output;

    /// Narrative once the base case is identified, before solving.
    fn divided_details(&self, input: &A::Input) -> CallDetails;

    /// Narrative once solved.
    fn solved_details(&self, input: &A::Input, result: &A::Output) -> CallDetails;
}

/// One subcall as seen by its parent's case.
pub struct Subcall<'a, A: Algorithm> {
    pub name: &'a str,
    pub input: &'a A::Input,
    /// `None` until the subcall is solved or memoised.
    pub result: Option<&'a A::Output>,
}

/// Read-only, ordered view of a divided call's subcalls.
pub struct Subcalls<'a, A: Algorithm> {
    entries: Vec<Subcall<'a, A>>,
}

impl<'a, A: Algorithm> Subcalls<'a, A> {
    pub(crate) fn new(entries: Vec<Subcall<'a, A>>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Subcall<'a, A>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Input of the named subcall.
    ///
    /// # Panics
    ///
    /// Panics if there is no subcall called `name`.
    pub fn input(&self, name: &str) -> &'a A::Input {
        self[name].input
    }

    /// Result of the named subcall.
    ///
    /// # Panics
    ///
    /// Panics if there is no subcall called `name` or it has no result yet.
    pub fn result(&self, name: &str) -> &'a A::Output {
        match self[name].result {
            Some(result) => result,
            None => panic!("Subcall {:?} has no result yet", name),
        }
    }

    /// Result of the first subcall, for cases with a single child.
    ///
    /// # Panics
    ///
    /// Panics if there are no subcalls or the first has no result yet.
    pub fn first_result(&self) -> &'a A::Output {
        match self.entries.first() {
            Some(entry) => self.result(entry.name),
            None => panic!("Case has no subcalls"),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subcall<'a, A>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, A: Algorithm> Index<&str> for Subcalls<'a, A> {
    type Output = Subcall<'a, A>;

    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(entry) => entry,
            None => panic!("No subcall named {:?}", name),
        }
    }
}
