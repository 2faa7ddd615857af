// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stepper configuration.

use serde::{Deserialize, Serialize};

/// Options applied when preparing a call tree with [`CallTree::prepared`].
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
///
/// [`CallTree::prepared`]: crate::engine::CallTree::prepared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// Start with memoisation enabled (only meaningful for memoisable algorithms).
    pub memoise: bool,

    /// Upper bound on steps taken by the shadow traversal that builds the memo table.
    pub max_shadow_steps: usize,
}

impl StepperConfig {
    pub const DEFAULT_MAX_SHADOW_STEPS: usize = 1_000_000;

    pub fn with_memoise(mut self, memoise: bool) -> Self {
        self.memoise = memoise;
        self
    }

    pub fn with_max_shadow_steps(mut self, max_shadow_steps: usize) -> Self {
        self.max_shadow_steps = max_shadow_steps;
        self
    }
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            memoise: false,
            max_shadow_steps: Self::DEFAULT_MAX_SHADOW_STEPS,
        }
    }
}
