// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shadow traversal building a [`MemoTable`].
//!
//! A throwaway tree of the same algorithm is solved to completion over a
//! copy of the input, one step at a time. Each step that leaves a call
//! strictly solved records that call's input, result and path, unless the
//! input was already recorded. The shadow tree memoises against the table as
//! it grows, so an input met again after its first solve is aliased instead
//! of re-solved; the first-solved paths are the same as those of an
//! exhaustive traversal, because step order is depth-first either way.

use super::MemoTable;
use crate::config::StepperConfig;
use crate::engine::{Algorithm, CallTree};
use crate::error::CallError;
use crate::values::Value;
use tracing::info;

impl<A: Algorithm + Clone> MemoTable<A> {
    /// Solve a shadow copy of the tree for `input` and collect its memo table.
    ///
    /// Fails with [`CallError::ShadowStepLimit`] if the traversal needs more
    /// than `config.max_shadow_steps` steps.
    ///
    /// ```
    /// use recursion_stepper::algorithms::fibonacci::{Fibonacci, FibonacciInput};
    /// use recursion_stepper::config::StepperConfig;
    /// use recursion_stepper::memo::MemoTable;
    ///
    /// let input = FibonacciInput::new(5).unwrap();
    /// let table = MemoTable::build(&Fibonacci, &input, &StepperConfig::default()).unwrap();
    /// assert_eq!(table.len(), 5); // n = 2, 1, 3, 4, 5
    /// ```
    pub fn build(
        algorithm: &A,
        input: &A::Input,
        config: &StepperConfig,
    ) -> Result<Self, CallError> {
        let mut shadow = CallTree::with_memo_table(
            algorithm.clone(),
            input.copy_default(),
            MemoTable::new(),
        );
        shadow.toggle_memoise();

        let root = shadow.root();
        let mut steps = 0usize;
        while let Some(acted) = shadow.step(root) {
            steps += 1;
            if steps > config.max_shadow_steps {
                return Err(CallError::ShadowStepLimit {
                    limit: config.max_shadow_steps,
                });
            }
            if !shadow.is_strictly_solved(acted) {
                continue;
            }
            if let Some((input, result, path)) = shadow.solved_snapshot(acted) {
                shadow.memo_table_mut().record(input, result, path);
            }
        }

        let mut table = shadow.into_memo_table();
        table.shadow_steps = steps;
        info!(
            entries = table.len(),
            shadow_steps = steps,
            "Memo table built"
        );
        Ok(table)
    }
}
