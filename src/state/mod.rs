// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-call lifecycle state.
//!
//! Each call is in exactly one of four states:
//!
//! ```text
//! Undivided ──divide──▶ Divided ──combine──▶ Solved
//!     │
//!     └──divide (equal input solved elsewhere)──▶ Memoised
//! ```
//!
//! Moving backwards (`back`, `unsolve`, `reset`) only ever retraces one of
//! these arrows, or collapses a call straight to `Undivided`.

pub mod statistics;

pub use statistics::{Counters, Statistics};

use crate::engine::{Algorithm, CallId, CallPath};
use serde::{Deserialize, Serialize};

/// Public tag for a call's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallStatus {
    /// Subcalls not determined yet.
    Undivided,
    /// Subcalls determined, not yet combined.
    Divided,
    /// Combined (or solved directly); result cached.
    Solved,
    /// Result aliased from an equal call solved elsewhere.
    Memoised,
}

/// The case a call was divided with, as held by the engine.
pub(crate) enum ActiveCase<A: Algorithm> {
    Divide {
        logic: A::Divide,
        subcalls: Vec<(String, CallId)>,
        cached: Option<A::Output>,
    },
    Base {
        logic: A::Base,
        cached: Option<A::Output>,
    },
}

impl<A: Algorithm> ActiveCase<A> {
    /// Named subcalls in insertion order (empty for base cases).
    pub(crate) fn subcalls(&self) -> &[(String, CallId)] {
        match self {
            ActiveCase::Divide { subcalls, .. } => subcalls,
            ActiveCase::Base { .. } => &[],
        }
    }

    pub(crate) fn cached(&self) -> Option<&A::Output> {
        match self {
            ActiveCase::Divide { cached, .. } | ActiveCase::Base { cached, .. } => cached.as_ref(),
        }
    }

    pub(crate) fn set_cached(&mut self, result: Option<A::Output>) {
        match self {
            ActiveCase::Divide { cached, .. } | ActiveCase::Base { cached, .. } => *cached = result,
        }
    }

    pub(crate) fn is_base(&self) -> bool {
        matches!(self, ActiveCase::Base { .. })
    }
}

pub(crate) enum CallState<A: Algorithm> {
    Undivided {
        /// Where an equal input is first solved, if the memo table knows it.
        memoised_path: Option<CallPath>,
    },
    Divided {
        case: ActiveCase<A>,
    },
    Solved {
        case: ActiveCase<A>,
        result: A::Output,
    },
    Memoised {
        memoised_path: CallPath,
        result: A::Output,
    },
}

impl<A: Algorithm> CallState<A> {
    pub(crate) fn status(&self) -> CallStatus {
        match self {
            CallState::Undivided { .. } => CallStatus::Undivided,
            CallState::Divided { .. } => CallStatus::Divided,
            CallState::Solved { .. } => CallStatus::Solved,
            CallState::Memoised { .. } => CallStatus::Memoised,
        }
    }

    pub(crate) fn case(&self) -> Option<&ActiveCase<A>> {
        match self {
            CallState::Divided { case } | CallState::Solved { case, .. } => Some(case),
            CallState::Undivided { .. } | CallState::Memoised { .. } => None,
        }
    }

    pub(crate) fn subcalls(&self) -> &[(String, CallId)] {
        match self.case() {
            Some(case) => case.subcalls(),
            None => &[],
        }
    }

    pub(crate) fn result(&self) -> Option<&A::Output> {
        match self {
            CallState::Solved { result, .. } | CallState::Memoised { result, .. } => Some(result),
            CallState::Undivided { .. } | CallState::Divided { .. } => None,
        }
    }

    pub(crate) fn memoised_path(&self) -> Option<&CallPath> {
        match self {
            CallState::Undivided { memoised_path } => memoised_path.as_ref(),
            CallState::Memoised { memoised_path, .. } => Some(memoised_path),
            CallState::Divided { .. } | CallState::Solved { .. } => None,
        }
    }
}

/// One node of the call tree.
pub(crate) struct CallNode<A: Algorithm> {
    pub(crate) input: A::Input,
    pub(crate) state: CallState<A>,
    /// Parent call and the name of the edge from it; `None` for the root.
    pub(crate) parent: Option<(CallId, String)>,
}

impl<A: Algorithm> CallNode<A> {
    pub(crate) fn new(
        input: A::Input,
        parent: Option<(CallId, String)>,
        memoised_path: Option<CallPath>,
    ) -> Self {
        Self {
            input,
            state: CallState::Undivided { memoised_path },
            parent,
        }
    }
}
