// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Halt and display decisions, derived from an immutable [`RunConfig`]

use crate::config::{Anomaly, HaltOn, RunConfig, Selectors};

/// Which piece of a finished test's report a display decision is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The one-line `[code] path` status marker
    Result,
    /// Captured standard output
    Stdout,
    /// Captured standard error
    Stderr,
}

/// Pure lookup over the halt table and display selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    halt_on: HaltOn,
    selectors: Selectors,
}

impl Policy {
    pub fn new(halt_on: HaltOn, selectors: Selectors) -> Self {
        Self { halt_on, selectors }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.halt_on(), config.selectors())
    }

    /// Whether detecting `anomaly` aborts the run.
    pub fn should_halt_on(&self, anomaly: Anomaly) -> bool {
        self.halt_on.get(anomaly)
    }

    /// Whether `selector` is echoed for a test that exited with `exit_code`.
    pub fn should_print(&self, selector: Selector, exit_code: i32) -> bool {
        let when = match selector {
            Selector::Result => self.selectors.result,
            Selector::Stdout => self.selectors.stdout,
            Selector::Stderr => self.selectors.stderr,
        };
        when.matches(exit_code)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
