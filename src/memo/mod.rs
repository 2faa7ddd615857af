// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Memo table: where each distinct input is first solved.
//!
//! The table is computed once, before the interactive tree is built, by a
//! shadow traversal (see [`shadow`]) that solves a disposable copy of the
//! tree to completion. It then stays immutable and is shared by every
//! operation on the live tree:
//!
//! - when a call is divided while memoising, an equal input recorded at a
//!   different path turns the call into an alias of that path's result;
//! - an undivided call whose canonical path is not solved yet is blocked.

pub mod shadow;

use crate::engine::{Algorithm, CallPath};
use std::fmt;

/// One distinct input, with the result and path of its first strict solve.
pub struct MemoisedResult<A: Algorithm> {
    pub input: A::Input,
    pub result: A::Output,
    pub first_solved_path: CallPath,
}

impl<A: Algorithm> Clone for MemoisedResult<A> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            result: self.result.clone(),
            first_solved_path: self.first_solved_path.clone(),
        }
    }
}

impl<A: Algorithm> fmt::Debug for MemoisedResult<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoisedResult")
            .field("input", &self.input)
            .field("result", &self.result)
            .field("first_solved_path", &self.first_solved_path)
            .finish()
    }
}

/// Memo entries in the order their inputs were first solved.
pub struct MemoTable<A: Algorithm> {
    entries: Vec<MemoisedResult<A>>,
    shadow_steps: usize,
}

impl<A: Algorithm> MemoTable<A> {
    /// An empty table; memoisation has no effect with it.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            shadow_steps: 0,
        }
    }

    /// Entry for an input equal to `input`, if any.
    pub fn lookup(&self, input: &A::Input) -> Option<&MemoisedResult<A>> {
        self.entries.iter().find(|entry| entry.input == *input)
    }

    /// Path where an input equal to `input` is first solved.
    pub fn canonical_path(&self, input: &A::Input) -> Option<&CallPath> {
        self.lookup(input).map(|entry| &entry.first_solved_path)
    }

    /// Record a strict solve. The first record for a given input wins;
    /// returns whether this one was kept.
    pub(crate) fn record(&mut self, input: A::Input, result: A::Output, path: CallPath) -> bool {
        if self.lookup(&input).is_some() {
            return false;
        }
        self.entries.push(MemoisedResult {
            input,
            result,
            first_solved_path: path,
        });
        true
    }

    pub fn entries(&self) -> &[MemoisedResult<A>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Steps the shadow traversal took to build this table.
    pub fn shadow_steps(&self) -> usize {
        self.shadow_steps
    }
}

impl<A: Algorithm> Default for MemoTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Algorithm> Clone for MemoTable<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            shadow_steps: self.shadow_steps,
        }
    }
}

impl<A: Algorithm> fmt::Debug for MemoTable<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("entries", &self.entries)
            .field("shadow_steps", &self.shadow_steps)
            .finish()
    }
}
