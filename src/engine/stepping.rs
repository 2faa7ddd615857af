// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Forward and backward stepping.
//!
//! `next`/`previous` are pure lookaheads; `step`/`back` act on the call they
//! name. Forward order is depth-first pre-order over subcalls in insertion
//! order; backward order is the mirror image, so `back` right after `step`
//! undoes it exactly. A `reset` or a subtree stepped ahead of its turn can
//! leave an unsolved call before a solved sibling: `step` fills that gap
//! first, while `back` still starts from the last solved sibling.

use super::{Algorithm, CallId, CallTree};
use crate::state::{CallState, CallStatus};
use tracing::debug;

impl<A: Algorithm> CallTree<A> {
    /// The call the next [`CallTree::step`] from `id` would act on.
    ///
    /// `None` if the subtree is solved, or if the first unsolved call in it
    /// is waiting on a memoised call.
    pub fn next(&self, id: CallId) -> Option<CallId> {
        let node = self.calls.get(id)?;
        match &node.state {
            CallState::Undivided { .. } => self.is_divisible(id).then_some(id),
            CallState::Divided { case } => {
                match case
                    .subcalls()
                    .iter()
                    .find(|(_, child)| !self.is_solved(*child))
                {
                    Some((_, child)) => self.next(*child),
                    None => Some(id),
                }
            }
            CallState::Solved { .. } | CallState::Memoised { .. } => None,
        }
    }

    /// Perform one action in the subtree at `id`: divide the first
    /// divisible call, or combine the first combinable one.
    ///
    /// Returns the call acted on.
    pub fn step(&mut self, id: CallId) -> Option<CallId> {
        let target = self.next(id)?;
        if self.is_divisible(target) {
            self.divide_unchecked(target);
        } else {
            self.combine_unchecked(target);
        }
        debug!(path = %self.path_of(target), status = ?self.status(target), "step");
        Some(target)
    }

    /// The call the next [`CallTree::back`] from `id` would act on.
    pub fn previous(&self, id: CallId) -> Option<CallId> {
        let node = self.calls.get(id)?;
        match &node.state {
            CallState::Undivided { .. } => None,
            CallState::Solved { .. } | CallState::Memoised { .. } => Some(id),
            CallState::Divided { case } => {
                match case.subcalls().iter().rev().find(|(_, child)| {
                    self.status(*child)
                        .is_some_and(|status| status != CallStatus::Undivided)
                }) {
                    Some((_, child)) => self.previous(*child),
                    None => Some(id),
                }
            }
        }
    }

    /// Undo one action in the subtree at `id`: unsolve the last solved call,
    /// or collapse the last divided call whose subcalls are all undivided.
    ///
    /// Returns the call acted on.
    pub fn back(&mut self, id: CallId) -> Option<CallId> {
        let target = self.previous(id)?;
        if self.status(target) == Some(CallStatus::Divided) {
            self.collapse(target);
        } else {
            self.unsolve(target);
        }
        debug!(path = %self.path_of(target), status = ?self.status(target), "back");
        Some(target)
    }
}
