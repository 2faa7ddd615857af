// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters kept by a call tree for the work it has actually performed.
//! Undoing a step does not decrement them.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Calls divided with a case.
    Divides,
    /// Divide cases combined.
    Combines,
    /// Base cases solved.
    BaseSolves,
    /// Calls redirected to an equal call's result.
    Redirections,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}
