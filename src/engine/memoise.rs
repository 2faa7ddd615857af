// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Memoisation on the live tree.
//!
//! Every call carries the path where its input is first solved, looked up
//! in the memo table when the call is created. While memoising:
//!
//! - an undivided call whose canonical path is elsewhere and not yet solved
//!   is blocked, and cannot be divided;
//! - dividing a call whose canonical path is elsewhere (and solved) makes it
//!   memoised, borrowing the canonical result;
//! - resetting a strictly solved call also resets every memoised alias of it.

use super::{Algorithm, CallId, CallPath, CallTree};
use crate::state::{CallState, CallStatus};
use tracing::{debug, info, warn};

impl<A: Algorithm> CallTree<A> {
    /// Canonical path this call is waiting on, if it is blocked.
    pub(crate) fn blocked_on(&self, id: CallId) -> Option<CallPath> {
        if !self.memoise {
            return None;
        }
        let CallState::Undivided {
            memoised_path: Some(canonical),
        } = &self.calls.get(id)?.state
        else {
            return None;
        };
        if *canonical == self.path_of(id) {
            return None;
        }
        let solved = self
            .call_from_root(canonical)
            .is_some_and(|source| self.is_strictly_solved(source));
        (!solved).then(|| canonical.clone())
    }

    /// Undivided and waiting on the canonical call for its input.
    pub fn is_blocked(&self, id: CallId) -> bool {
        self.blocked_on(id).is_some()
    }

    /// Collapse `id` to undivided, unsolving its solved ancestors.
    ///
    /// While memoising, any memoised call aliasing a path whose result this
    /// discards is reset in turn. Resetting an undivided call does nothing.
    pub fn reset(&mut self, id: CallId) {
        let mut pending = vec![id];
        while let Some(call) = pending.pop() {
            if !matches!(
                self.status(call),
                Some(CallStatus::Divided | CallStatus::Solved | CallStatus::Memoised)
            ) {
                continue;
            }
            let invalidated = self.reset_one(call);
            debug!(path = %self.path_of(call), invalidated = invalidated.len(), "reset");
            if !self.memoise || invalidated.is_empty() {
                continue;
            }
            for alias in self.all_tree_calls().into_iter().rev() {
                let aliases_invalidated = match self.calls.get(alias).map(|node| &node.state) {
                    Some(CallState::Memoised { memoised_path, .. }) => {
                        invalidated.contains(memoised_path)
                    }
                    _ => false,
                };
                if aliases_invalidated {
                    pending.push(alias);
                }
            }
        }
    }

    /// Unsolve strictly solved ancestors and collapse `id`. Returns the
    /// paths whose strict results were discarded.
    fn reset_one(&mut self, id: CallId) -> Vec<CallPath> {
        let mut invalidated = Vec::new();
        for ancestor in self.ancestors(id) {
            if self.is_strictly_solved(ancestor) {
                invalidated.push(self.path_of(ancestor));
                self.unsolve(ancestor);
            }
        }
        for call in self.all_subcalls(id) {
            if self.is_strictly_solved(call) {
                invalidated.push(self.path_of(call));
            }
        }
        self.collapse(id);
        invalidated
    }

    /// Flip memoisation, returning the new setting.
    ///
    /// Turning it off re-solves each memoised call on its own. Turning it on
    /// checks every call against the memo table, deepest first: a divided or
    /// solved call whose input is first solved elsewhere becomes memoised if
    /// that call is solved, and is reset otherwise.
    pub fn toggle_memoise(&mut self) -> bool {
        self.memoise = !self.memoise;
        info!(memoise = self.memoise, "Memoisation toggled");
        if self.memoise {
            self.apply_memo_table();
        } else {
            self.expand_memoised();
        }
        self.memoise
    }

    fn expand_memoised(&mut self) {
        let memoised: Vec<CallId> = self
            .all_tree_calls()
            .into_iter()
            .filter(|call| self.is_memoised(*call))
            .collect();
        for call in memoised {
            self.unsolve(call);
            if let Err(error) = self.conquer(call) {
                warn!(path = %self.path_of(call), %error, "Could not re-solve memoised call");
            }
        }
    }

    fn apply_memo_table(&mut self) {
        if self.memo.is_empty() {
            return;
        }
        for call in self.all_tree_calls().into_iter().rev() {
            if !self.is_divided(call) {
                continue;
            }
            let Some(canonical) = self
                .calls
                .get(call)
                .and_then(|node| self.memo.canonical_path(&node.input))
                .cloned()
            else {
                continue;
            };
            if canonical == self.path_of(call) {
                continue;
            }
            let source_solved = self
                .call_from_root(&canonical)
                .is_some_and(|source| self.is_strictly_solved(source));
            if source_solved {
                self.redirect(call, canonical);
            } else {
                self.reset(call);
            }
        }
    }
}
