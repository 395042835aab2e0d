// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate outcome of a run

use crate::error::{exit_code, RunError};
use crate::exec::TestResult;
use std::path::{Path, PathBuf};

/// Running tally, updated once per finished test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    passed: usize,
    failed: usize,
    halted_on: Option<PathBuf>,
}

impl RunOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &TestResult) {
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Mark the run as stopped early by a failure of `path`.
    pub fn halt(&mut self, path: &Path) {
        self.halted_on = Some(path.to_path_buf());
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }

    pub fn halted_early(&self) -> bool {
        self.halted_on.is_some()
    }

    pub fn exit_code(&self) -> i32 {
        if self.any_failed() {
            exit_code::TESTS_FAILED
        } else {
            exit_code::SUCCESS
        }
    }

    /// Convert a finished tally into the run's final result.
    pub fn into_result(self) -> Result<Self, RunError> {
        if let Some(path) = self.halted_on {
            return Err(RunError::HaltedOnFailure(path));
        }
        if self.any_failed() {
            return Err(RunError::TestsFailed {
                failed: self.failed,
                total: self.total(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
