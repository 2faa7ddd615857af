// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Test algorithms for validating the call tree engine.
//!
//! These plug-ins strip away presentation so that tests can observe the
//! engine itself:
//! - [`CountingFibonacci`] counts every base solve and combine it performs,
//!   which shows whether cached results are reused
//! - [`DuplicateNames`] breaks the unique-name contract on purpose

use crate::details::CallDetails;
use crate::engine::{Algorithm, BaseCase, Case, DivideCase, Subcalls};
use crate::values::NumberValue;
use std::cell::Cell;
use std::rc::Rc;

/// Shared tallies of work done by a [`CountingFibonacci`].
#[derive(Debug, Default)]
pub struct WorkCounts {
    solves: Cell<u64>,
    combines: Cell<u64>,
}

impl WorkCounts {
    pub fn solves(&self) -> u64 {
        self.solves.get()
    }

    pub fn combines(&self) -> u64 {
        self.combines.get()
    }

    pub fn reset(&self) {
        self.solves.set(0);
        self.combines.set(0);
    }
}

/// Fibonacci over bare numbers that records how often it does real work.
///
/// Clones share their counts, so a tree built with [`CallTree::prepared`]
/// also counts the work of the memo table's shadow traversal. Call
/// [`WorkCounts::reset`] afterwards to observe only the tree's own work.
///
/// # Example
///
/// ```
/// use recursion_stepper::algorithms::test::CountingFibonacci;
/// use recursion_stepper::engine::CallTree;
/// use recursion_stepper::values::NumberValue;
///
/// let fibonacci = CountingFibonacci::new(false);
/// let counts = fibonacci.counts();
/// let mut tree = CallTree::new(fibonacci, NumberValue::new(4));
/// let root = tree.root();
///
/// assert_eq!(tree.result(root).unwrap().value, 3);
/// assert_eq!(counts.solves(), 3);
/// assert_eq!(counts.combines(), 2);
///
/// // A second request reuses the cached result.
/// tree.result(root).unwrap();
/// assert_eq!(counts.combines(), 2);
/// ```
///
/// [`CallTree::prepared`]: crate::engine::CallTree::prepared
#[derive(Debug, Clone)]
pub struct CountingFibonacci {
    counts: Rc<WorkCounts>,
    memoisable: bool,
}

impl CountingFibonacci {
    pub fn new(memoisable: bool) -> Self {
        Self {
            counts: Rc::new(WorkCounts::default()),
            memoisable,
        }
    }

    /// A handle on the counts, still readable after the algorithm moves into a tree.
    pub fn counts(&self) -> Rc<WorkCounts> {
        Rc::clone(&self.counts)
    }
}

impl Algorithm for CountingFibonacci {
    type Input = NumberValue;
    type Output = NumberValue;
    type Divide = CountingSum;
    type Base = CountingOne;

    fn case(&self, input: &NumberValue) -> Case<CountingSum, CountingOne> {
        if input.value <= 2 {
            Case::Base(CountingOne(self.counts()))
        } else {
            Case::Divide(CountingSum(self.counts()))
        }
    }

    fn undivided_details(&self, _input: &NumberValue) -> CallDetails {
        Vec::new()
    }

    fn is_memoisable(&self) -> bool {
        self.memoisable
    }
}

#[derive(Debug)]
pub struct CountingSum(Rc<WorkCounts>);

impl DivideCase<CountingFibonacci> for CountingSum {
    fn divide(&self, input: &NumberValue) -> Vec<(String, NumberValue)> {
        vec![
            ("n-1".to_string(), NumberValue::new(input.value - 1)),
            ("n-2".to_string(), NumberValue::new(input.value - 2)),
        ]
    }

    fn combine(
        &self,
        _input: &NumberValue,
        subcalls: &Subcalls<'_, CountingFibonacci>,
    ) -> NumberValue {
        self.0.combines.set(self.0.combines.get() + 1);
        NumberValue::new(subcalls.result("n-1").value + subcalls.result("n-2").value)
    }

    fn divided_details(
        &self,
        _input: &NumberValue,
        _subcalls: &Subcalls<'_, CountingFibonacci>,
    ) -> CallDetails {
        Vec::new()
    }

    fn solved_details(
        &self,
        _input: &NumberValue,
        _subcalls: &Subcalls<'_, CountingFibonacci>,
        _result: &NumberValue,
    ) -> CallDetails {
        Vec::new()
    }
}

#[derive(Debug)]
pub struct CountingOne(Rc<WorkCounts>);

impl BaseCase<CountingFibonacci> for CountingOne {
    fn solve(&self, _input: &NumberValue) -> NumberValue {
        self.0.solves.set(self.0.solves.get() + 1);
        NumberValue::new(1)
    }

    fn divided_details(&self, _input: &NumberValue) -> CallDetails {
        Vec::new()
    }

    fn solved_details(&self, _input: &NumberValue, _result: &NumberValue) -> CallDetails {
        Vec::new()
    }
}

/// Divides every input above 1 into two subcalls that share a name.
///
/// Dividing such a call panics, since names address subcalls.
///
/// ```should_panic
/// use recursion_stepper::algorithms::test::DuplicateNames;
/// use recursion_stepper::engine::CallTree;
/// use recursion_stepper::values::NumberValue;
///
/// let mut tree = CallTree::new(DuplicateNames, NumberValue::new(2));
/// let root = tree.root();
/// let _ = tree.divide(root);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateNames;

impl Algorithm for DuplicateNames {
    type Input = NumberValue;
    type Output = NumberValue;
    type Divide = Twins;
    type Base = Identity;

    fn case(&self, input: &NumberValue) -> Case<Twins, Identity> {
        if input.value <= 1 {
            Case::Base(Identity)
        } else {
            Case::Divide(Twins)
        }
    }

    fn undivided_details(&self, _input: &NumberValue) -> CallDetails {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Twins;

impl DivideCase<DuplicateNames> for Twins {
    fn divide(&self, input: &NumberValue) -> Vec<(String, NumberValue)> {
        let half = NumberValue::new(input.value / 2);
        vec![("Half".to_string(), half), ("Half".to_string(), half)]
    }

    fn combine(
        &self,
        _input: &NumberValue,
        subcalls: &Subcalls<'_, DuplicateNames>,
    ) -> NumberValue {
        *subcalls.first_result()
    }

    fn divided_details(
        &self,
        _input: &NumberValue,
        _subcalls: &Subcalls<'_, DuplicateNames>,
    ) -> CallDetails {
        Vec::new()
    }

    fn solved_details(
        &self,
        _input: &NumberValue,
        _subcalls: &Subcalls<'_, DuplicateNames>,
        _result: &NumberValue,
    ) -> CallDetails {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identity;

impl BaseCase<DuplicateNames> for Identity {
    fn solve(&self, input: &NumberValue) -> NumberValue {
        *input
    }

    fn divided_details(&self, _input: &NumberValue) -> CallDetails {
        Vec::new()
    }

    fn solved_details(&self, _input: &NumberValue, _result: &NumberValue) -> CallDetails {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CallTree;

    #[test]
    fn test_counts_shared_between_clones() {
        let fibonacci = CountingFibonacci::new(true);
        let counts = fibonacci.counts();
        let mut tree = CallTree::new(fibonacci.clone(), NumberValue::new(5));
        let root = tree.root();
        assert_eq!(tree.result(root).unwrap().value, 5);
        assert_eq!(counts.solves(), 5);
        assert_eq!(counts.combines(), 4);

        counts.reset();
        assert_eq!(fibonacci.counts().solves(), 0);
    }

    #[test]
    fn test_memoisable_flag() {
        assert!(CountingFibonacci::new(true).is_memoisable());
        assert!(!CountingFibonacci::new(false).is_memoisable());
        assert!(!DuplicateNames.is_memoisable());
    }
}
