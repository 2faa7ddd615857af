// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Whole-tree snapshots.
//!
//! A snapshot records each call by path rather than by [`CallId`], so two
//! trees (or one tree at two moments) compare equal whenever they hold the
//! same states, even if arena slots were reused in between.
//!
//! [`CallId`]: super::CallId

use super::{Algorithm, CallPath, CallTree};
use crate::state::{CallState, CallStatus};

/// State of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSnapshot<In, Out> {
    pub path: CallPath,
    pub input: In,
    pub status: CallStatus,
    pub result: Option<Out>,
    /// Result cached on the call's case, if any.
    pub cached: Option<Out>,
    pub memoised_path: Option<CallPath>,
}

/// Every call of a tree in depth-first pre-order, plus the memoisation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot<In, Out> {
    pub memoising: bool,
    pub calls: Vec<CallSnapshot<In, Out>>,
}

impl<In, Out> TreeSnapshot<In, Out> {
    /// Number of calls with the given status.
    pub fn count(&self, status: CallStatus) -> usize {
        self.calls.iter().filter(|call| call.status == status).count()
    }

    pub fn get(&self, path: &CallPath) -> Option<&CallSnapshot<In, Out>> {
        self.calls.iter().find(|call| call.path == *path)
    }

    /// Paths of the calls with the given status, in pre-order.
    pub fn paths_with(&self, status: CallStatus) -> Vec<&CallPath> {
        self.calls
            .iter()
            .filter(|call| call.status == status)
            .map(|call| &call.path)
            .collect()
    }
}

impl<A: Algorithm> CallTree<A> {
    pub fn snapshot(&self) -> TreeSnapshot<A::Input, A::Output> {
        let calls = self
            .all_tree_calls()
            .into_iter()
            .filter_map(|id| {
                let node = self.calls.get(id)?;
                let cached = match &node.state {
                    CallState::Divided { case } | CallState::Solved { case, .. } => {
                        case.cached().cloned()
                    }
                    CallState::Undivided { .. } | CallState::Memoised { .. } => None,
                };
                Some(CallSnapshot {
                    path: self.path_from_root(id)?,
                    input: node.input.clone(),
                    status: node.state.status(),
                    result: node.state.result().cloned(),
                    cached,
                    memoised_path: node.state.memoised_path().cloned(),
                })
            })
            .collect();
        TreeSnapshot {
            memoising: self.memoise,
            calls,
        }
    }
}
