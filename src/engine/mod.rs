// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Steppable, reversible call tree.
//!
//! A [`CallTree`] holds one recursive computation as a tree of calls, each
//! of which moves through the lifecycle described in [`crate::state`]. The
//! tree is driven from outside, one atomic action at a time:
//!
//! - [`CallTree::step`] divides or combines exactly one call, chosen by a
//!   depth-first pre-order walk over subcalls in insertion order;
//! - [`CallTree::back`] undoes exactly one such action, walking the same
//!   order in reverse;
//! - [`CallTree::reset`] collapses a call and everything computed on top of it.
//!
//! # Architecture
//!
//! Calls live in a generational arena and refer to their parent and
//! children by [`CallId`]. The tree itself owns the algorithm, the memo
//! table and the memoisation flag, so no call needs a pointer back to the
//! root. The modules split the work as follows:
//!
//! - `stepping`: `next`/`step` and `previous`/`back`
//! - `memoise`: blocking, redirection, `reset` and `toggle_memoise`
//! - `navigation`: paths and enumeration
//! - `snapshot`: comparable whole-tree snapshots
//!
//! # Example
//!
//! ```
//! use recursion_stepper::algorithms::merge_sort::{MergeSort, MergeSortInput};
//! use recursion_stepper::engine::CallTree;
//!
//! let input = MergeSortInput::new(&[3, 1, 2]).unwrap();
//! let mut tree = CallTree::new(MergeSort, input);
//! let root = tree.root();
//!
//! let mut steps = 0;
//! while tree.step(root).is_some() {
//!     steps += 1;
//! }
//! assert_eq!(tree.result(root).unwrap().raw(), vec![1, 2, 3]);
//!
//! // Every step can be undone.
//! while tree.back(root).is_some() {
//!     steps -= 1;
//! }
//! assert_eq!(steps, 0);
//! ```

pub mod arena;
pub mod case;
mod memoise;
mod navigation;
pub mod path;
mod snapshot;
mod stepping;

pub use arena::CallId;
pub use case::{Algorithm, BaseCase, Case, DivideCase, Subcall, Subcalls};
pub use navigation::SubcallPosition;
pub use path::CallPath;
pub use snapshot::{CallSnapshot, TreeSnapshot};

use crate::config::StepperConfig;
use crate::details::CallDetails;
use crate::error::{CallError, CallResult};
use crate::memo::MemoTable;
use crate::state::{ActiveCase, CallNode, CallState, CallStatus, Counters, Statistics};
use arena::Arena;
use tracing::trace;

/// A recursive computation that can be stepped forwards and backwards.
pub struct CallTree<A: Algorithm> {
    algorithm: A,
    calls: Arena<CallNode<A>>,
    root: CallId,
    memo: MemoTable<A>,
    memoise: bool,
    statistics: Statistics,
}

impl<A: Algorithm> CallTree<A> {
    /// Create an undivided tree for `input` with an empty memo table.
    pub fn new(algorithm: A, input: A::Input) -> Self {
        Self::with_memo_table(algorithm, input, MemoTable::new())
    }

    /// Create an undivided tree sharing a prebuilt memo table.
    ///
    /// Memoisation starts disabled; see [`CallTree::toggle_memoise`].
    pub fn with_memo_table(algorithm: A, input: A::Input, memo: MemoTable<A>) -> Self {
        let mut calls = Arena::new();
        let memoised_path = memo.canonical_path(&input).cloned();
        let root = calls.insert(CallNode::new(input, None, memoised_path));
        Self {
            algorithm,
            calls,
            root,
            memo,
            memoise: false,
            statistics: Statistics::new(),
        }
    }

    /// Create a tree ready for interactive use.
    ///
    /// Memoisable algorithms get their memo table built first by a shadow
    /// traversal, and `config.memoise` sets the initial memoisation flag.
    pub fn prepared(algorithm: A, input: A::Input, config: &StepperConfig) -> CallResult<Self>
    where
        A: Clone,
    {
        let memo = if algorithm.is_memoisable() {
            MemoTable::build(&algorithm, &input, config)?
        } else {
            MemoTable::new()
        };
        let mut tree = Self::with_memo_table(algorithm, input, memo);
        tree.memoise = config.memoise;
        Ok(tree)
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn memo_table(&self) -> &MemoTable<A> {
        &self.memo
    }

    pub(crate) fn memo_table_mut(&mut self) -> &mut MemoTable<A> {
        &mut self.memo
    }

    pub(crate) fn into_memo_table(self) -> MemoTable<A> {
        self.memo
    }

    /// Whether equal inputs are currently redirected to a single solution.
    pub fn is_memoising(&self) -> bool {
        self.memoise
    }

    /// Work performed on this tree so far.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Number of live calls.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    fn node(&self, id: CallId) -> CallResult<&CallNode<A>> {
        self.calls.get(id).ok_or(CallError::UnknownCall)
    }

    /// Path of a call known to be live.
    fn path_of(&self, id: CallId) -> CallPath {
        self.path_from_root(id).unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    /// Lifecycle tag, or `None` for a call that is not in the tree.
    pub fn status(&self, id: CallId) -> Option<CallStatus> {
        self.calls.get(id).map(|node| node.state.status())
    }

    /// A copy of the call's input.
    pub fn input(&self, id: CallId) -> Option<A::Input> {
        self.calls.get(id).map(|node| node.input.clone())
    }

    /// Result of a solved or memoised call, without forcing anything.
    pub fn solved_result(&self, id: CallId) -> Option<&A::Output> {
        self.calls.get(id).and_then(|node| node.state.result())
    }

    /// Where an equal input is first solved, as recorded on this call.
    pub fn memoised_path(&self, id: CallId) -> Option<&CallPath> {
        self.calls.get(id).and_then(|node| node.state.memoised_path())
    }

    /// Divided or solved: the call has a case.
    pub fn is_divided(&self, id: CallId) -> bool {
        matches!(
            self.status(id),
            Some(CallStatus::Divided) | Some(CallStatus::Solved)
        )
    }

    /// Solved or memoised: a result is available.
    pub fn is_solved(&self, id: CallId) -> bool {
        matches!(
            self.status(id),
            Some(CallStatus::Solved) | Some(CallStatus::Memoised)
        )
    }

    /// Solved by its own case, not borrowed from elsewhere.
    pub fn is_strictly_solved(&self, id: CallId) -> bool {
        self.status(id) == Some(CallStatus::Solved)
    }

    pub fn is_memoised(&self, id: CallId) -> bool {
        self.status(id) == Some(CallStatus::Memoised)
    }

    /// Divided with a base case.
    pub fn is_base_case(&self, id: CallId) -> bool {
        self.calls
            .get(id)
            .and_then(|node| node.state.case())
            .is_some_and(ActiveCase::is_base)
    }

    /// Undivided, and not waiting on a memoised call that is still unsolved.
    pub fn is_divisible(&self, id: CallId) -> bool {
        self.status(id) == Some(CallStatus::Undivided) && !self.is_blocked(id)
    }

    /// Divided, and every subcall solved or memoised.
    pub fn is_combinable(&self, id: CallId) -> bool {
        match self.calls.get(id).map(|node| &node.state) {
            Some(CallState::Divided { case }) => {
                case.subcalls().iter().all(|(_, child)| self.is_solved(*child))
            }
            _ => false,
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Divide an undivided call.
    ///
    /// While memoising, a call whose input was first solved at another path
    /// becomes memoised instead, borrowing that result.
    pub fn divide(&mut self, id: CallId) -> CallResult<()> {
        self.node(id)?;
        if let Some(waiting_on) = self.blocked_on(id) {
            return Err(CallError::Blocked {
                path: self.path_of(id),
                waiting_on,
            });
        }
        if !self.is_divisible(id) {
            return Err(CallError::NotDivisible {
                path: self.path_of(id),
            });
        }
        self.divide_unchecked(id);
        Ok(())
    }

    /// Combine a divided call whose subcalls are all solved.
    pub fn combine(&mut self, id: CallId) -> CallResult<()> {
        self.node(id)?;
        if !self.is_combinable(id) {
            return Err(CallError::NotCombinable {
                path: self.path_of(id),
            });
        }
        self.combine_unchecked(id);
        Ok(())
    }

    /// Step the subtree at `id` until the call is solved.
    pub fn conquer(&mut self, id: CallId) -> CallResult<()> {
        self.node(id)?;
        while !self.is_solved(id) {
            if self.step(id).is_none() {
                return Err(self.stalled(id));
            }
        }
        Ok(())
    }

    /// The call's result, solving it first if necessary.
    pub fn result(&mut self, id: CallId) -> CallResult<A::Output> {
        if !self.is_solved(id) {
            self.conquer(id)?;
        }
        let node = self.node(id)?;
        node.state
            .result()
            .cloned()
            .ok_or_else(|| CallError::NotCombinable {
                path: self.path_of(id),
            })
    }

    /// Move a solved call back one state: solved to divided, discarding the
    /// cached result, or memoised to undivided, keeping the memo pointer.
    ///
    /// Returns `false` if the call was not solved.
    pub fn unsolve(&mut self, id: CallId) -> bool {
        let Some(node) = self.calls.get_mut(id) else {
            return false;
        };
        let state = std::mem::replace(
            &mut node.state,
            CallState::Undivided {
                memoised_path: None,
            },
        );
        let (state, unsolved) = match state {
            CallState::Solved { mut case, .. } => {
                case.set_cached(None);
                (CallState::Divided { case }, true)
            }
            CallState::Memoised { memoised_path, .. } => (
                CallState::Undivided {
                    memoised_path: Some(memoised_path),
                },
                true,
            ),
            other => (other, false),
        };
        node.state = state;
        unsolved
    }

    /// Narrative for the call's current state.
    pub fn details(&self, id: CallId) -> Option<CallDetails> {
        let node = self.calls.get(id)?;
        let input = &node.input;
        let details = match &node.state {
            CallState::Undivided { .. } => match self.blocked_on(id) {
                Some(waiting_on) => self.algorithm.blocked_details(input, &waiting_on),
                None => self.algorithm.undivided_details(input),
            },
            CallState::Divided { case } => match case {
                ActiveCase::Divide {
                    logic, subcalls, ..
                } => logic.divided_details(input, &self.subcalls_view(subcalls)),
                ActiveCase::Base { logic, .. } => logic.divided_details(input),
            },
            CallState::Solved { case, result } => match case {
                ActiveCase::Divide {
                    logic, subcalls, ..
                } => logic.solved_details(input, &self.subcalls_view(subcalls), result),
                ActiveCase::Base { logic, .. } => logic.solved_details(input, result),
            },
            CallState::Memoised {
                memoised_path,
                result,
            } => self.algorithm.memoised_details(input, result, memoised_path),
        };
        Some(details)
    }

    // ---------------------------------------------------------------------
    // Internal transitions
    // ---------------------------------------------------------------------

    /// Divide, assuming [`CallTree::is_divisible`] holds.
    fn divide_unchecked(&mut self, id: CallId) {
        let Some(node) = self.calls.get(id) else {
            return;
        };
        let input = node.input.clone();
        let own_path = self.path_of(id);

        if self.memoise {
            if let Some(canonical) = self.memo.canonical_path(&input) {
                if *canonical != own_path {
                    let canonical = canonical.clone();
                    self.redirect(id, canonical);
                    return;
                }
            }
        }

        let case = match self.algorithm.case(&input) {
            Case::Base(logic) => ActiveCase::Base {
                logic,
                cached: None,
            },
            Case::Divide(logic) => {
                let mut subcalls: Vec<(String, CallId)> = Vec::new();
                for (name, child_input) in logic.divide(&input) {
                    assert!(
                        subcalls.iter().all(|(existing, _)| *existing != name),
                        "Duplicate subcall {:?} at {}",
                        name,
                        own_path
                    );
                    let memoised_path = self.memo.canonical_path(&child_input).cloned();
                    let child = self.calls.insert(CallNode::new(
                        child_input,
                        Some((id, name.clone())),
                        memoised_path,
                    ));
                    subcalls.push((name, child));
                }
                ActiveCase::Divide {
                    logic,
                    subcalls,
                    cached: None,
                }
            }
        };
        self.statistics.increment_counter(Counters::Divides);
        if let Some(node) = self.calls.get_mut(id) {
            node.state = CallState::Divided { case };
        }
    }

    /// Replace the call's state with an alias of the result at `canonical`,
    /// discarding any subtree it had.
    fn redirect(&mut self, id: CallId, canonical: CallPath) {
        let source = self
            .call_from_root(&canonical)
            .filter(|source| self.is_strictly_solved(*source));
        let result = match source.and_then(|source| self.solved_result(source)) {
            Some(result) => result.clone(),
            None => match self
                .calls
                .get(id)
                .and_then(|node| self.memo.lookup(&node.input))
            {
                Some(entry) => entry.result.clone(),
                None => return,
            },
        };
        trace!(path = %self.path_of(id), canonical = %canonical, "Redirected to memoised result");
        self.remove_subcalls(id);
        self.statistics.increment_counter(Counters::Redirections);
        if let Some(node) = self.calls.get_mut(id) {
            node.state = CallState::Memoised {
                memoised_path: canonical,
                result,
            };
        }
    }

    /// Combine, assuming [`CallTree::is_combinable`] holds. The case's
    /// cached result is reused if it has one.
    fn combine_unchecked(&mut self, id: CallId) {
        let Some(node) = self.calls.get(id) else {
            return;
        };
        let CallState::Divided { case } = &node.state else {
            return;
        };
        let counter = if case.is_base() {
            Counters::BaseSolves
        } else {
            Counters::Combines
        };
        let (result, computed) = match case.cached() {
            Some(cached) => (cached.clone(), false),
            None => {
                let result = match case {
                    ActiveCase::Divide {
                        logic, subcalls, ..
                    } => logic.combine(&node.input, &self.subcalls_view(subcalls)),
                    ActiveCase::Base { logic, .. } => logic.solve(&node.input),
                };
                (result, true)
            }
        };
        if computed {
            self.statistics.increment_counter(counter);
        }

        if let Some(node) = self.calls.get_mut(id) {
            let state = std::mem::replace(
                &mut node.state,
                CallState::Undivided {
                    memoised_path: None,
                },
            );
            node.state = match state {
                CallState::Divided { mut case } => {
                    case.set_cached(Some(result.clone()));
                    CallState::Solved { case, result }
                }
                other => other,
            };
        }
    }

    /// Collapse a call to undivided, discarding its subtree.
    fn collapse(&mut self, id: CallId) {
        self.remove_subcalls(id);
        let memoised_path = self
            .calls
            .get(id)
            .and_then(|node| self.memo.canonical_path(&node.input))
            .cloned();
        if let Some(node) = self.calls.get_mut(id) {
            node.state = CallState::Undivided { memoised_path };
        }
    }

    /// Free every call below `id`; `id` itself stays in place.
    fn remove_subcalls(&mut self, id: CallId) {
        for call in self.all_subcalls(id).into_iter().skip(1) {
            self.calls.remove(call);
        }
    }

    fn subcalls_view<'a>(&'a self, subcalls: &'a [(String, CallId)]) -> Subcalls<'a, A> {
        Subcalls::new(
            subcalls
                .iter()
                .filter_map(|(name, child)| {
                    let node = self.calls.get(*child)?;
                    Some(Subcall {
                        name: name.as_str(),
                        input: &node.input,
                        result: node.state.result(),
                    })
                })
                .collect(),
        )
    }

    /// Explain why stepping from `id` made no progress.
    fn stalled(&self, id: CallId) -> CallError {
        let mut current = id;
        loop {
            match self.calls.get(current).map(|node| &node.state) {
                Some(CallState::Undivided { .. }) => {
                    return match self.blocked_on(current) {
                        Some(waiting_on) => CallError::Blocked {
                            path: self.path_of(current),
                            waiting_on,
                        },
                        None => CallError::NotDivisible {
                            path: self.path_of(current),
                        },
                    };
                }
                Some(CallState::Divided { case }) => {
                    match case
                        .subcalls()
                        .iter()
                        .find(|(_, child)| !self.is_solved(*child))
                    {
                        Some((_, child)) => current = *child,
                        None => break,
                    }
                }
                _ => break,
            }
        }
        CallError::NotCombinable {
            path: self.path_of(current),
        }
    }

    /// Input, result and path of a strictly solved call.
    pub(crate) fn solved_snapshot(&self, id: CallId) -> Option<(A::Input, A::Output, CallPath)> {
        let node = self.calls.get(id)?;
        match &node.state {
            CallState::Solved { result, .. } => {
                Some((node.input.clone(), result.clone(), self.path_of(id)))
            }
            _ => None,
        }
    }
}
