// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! [`CallError`] covers misuse of the call tree: acting on a call whose state
//! does not allow the action. These are programming errors for a driver that
//! only uses `step`/`back`, but the explicit `divide`/`combine`/`result`
//! operations report them instead of corrupting the tree.
//!
//! [`InputError`] is raised by algorithm input constructors when the user's
//! input is outside the algorithm's domain.

use crate::engine::CallPath;
use thiserror::Error;

/// Errors raised by call tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("call handle does not refer to a live call in this tree")]
    UnknownCall,

    #[error("call at {path} cannot be divided in its current state")]
    NotDivisible { path: CallPath },

    #[error("call at {path} cannot be combined until all of its subcalls are solved")]
    NotCombinable { path: CallPath },

    #[error("call at {path} is waiting on the memoised call at {waiting_on}")]
    Blocked { path: CallPath, waiting_on: CallPath },

    #[error("shadow traversal exceeded {limit} steps")]
    ShadowStepLimit { limit: usize },
}

/// Domain errors for algorithm inputs, carrying a message fit for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter at least one element.")]
    EmptyArray,

    #[error("Array must be sorted.")]
    UnsortedArray,

    #[error("Fibonacci is only defined for positive integers.")]
    NonPositive,

    #[error("Please enter a number less than or equal to {max}.")]
    TooLarge { max: i64 },

    #[error("Please enter non-negative numbers.")]
    Negative,

    #[error("Please enter numbers less than {limit}.")]
    OperandTooLarge { limit: i64 },

    #[error("Please enter at most {max} elements between the two lists.")]
    TooManyElements { max: usize },
}

/// Result alias for call tree operations.
pub type CallResult<T> = Result<T, CallError>;
