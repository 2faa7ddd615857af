// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Step forwards and backwards through divide-and-conquer recursion.
//!
//! A recursive algorithm is described as a plug-in (see [`engine::Algorithm`])
//! and run inside a [`CallTree`], which materialises every call as a node
//! and advances the computation one atomic action at a time. Every action
//! can be undone, and for algorithms whose subproblems overlap the tree can
//! redirect repeated calls to the result of the first equal call.
//!
//! # Architecture
//!
//! The implementation separates two kinds of data:
//!
//! ## Precomputed data (immutable)
//!
//! Built once before stepping starts and never changed by it:
//! - The [`MemoTable`], filled by a shadow traversal of the whole tree
//!   (see [`memo::shadow`]), mapping each distinct input to the path where
//!   it is first solved and to its result
//!
//! ## Call tree state (mutable)
//!
//! Changed by every step and undone by `back` and `reset`:
//! - One lifecycle state per call ([`state`])
//! - The arena of calls, addressed by [`engine::CallId`] and by
//!   [`engine::CallPath`]
//! - Work counters ([`state::Statistics`])
//!
//! # Stepping
//!
//! `step` performs the first pending action in depth-first pre-order:
//!
//! 1. **Divide** an undivided call, creating its named subcalls (or
//!    redirecting it to a memoised result)
//! 2. **Combine** a divided call whose subcalls are all solved
//!
//! `back` undoes the most recent such action in the same order.
//!
//! # Plug-ins
//!
//! [`algorithms`] holds reference plug-ins: Fibonacci, merge sort,
//! quicksort, binary search, Karatsuba multiplication and longest common
//! subsequence.

pub mod algorithms;
pub mod config;
pub mod details;
pub mod engine;
pub mod error;
pub mod memo;
pub mod state;
pub mod values;

// Re-export commonly used types
pub use config::StepperConfig;
pub use details::{CallDetails, CallDetailsStep, Keyframe};
pub use engine::{Algorithm, CallId, CallPath, CallTree};
pub use error::{CallError, CallResult, InputError};
pub use memo::MemoTable;
pub use state::CallStatus;
