// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result reporting
//!
//! For each finished test the reporter independently decides whether to
//! echo captured stdout (to its stdout), captured stderr (to its stderr)
//! and a `[code] path` status marker (to its stderr). Quiet mode only
//! suppresses the marker.

use crate::exec::TestResult;
use crate::policy::{Policy, Selector};
use std::io::{self, Write};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Writes per-test reports to a pair of output streams.
pub struct Reporter<O, E> {
    out: O,
    err: E,
    policy: Policy,
    quiet: bool,
    colorize: bool,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, policy: Policy) -> Self {
        Self {
            out,
            err,
            policy,
            quiet: false,
            colorize: false,
        }
    }

    /// Suppress the status marker (captured output is unaffected).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Color the status marker green on success and red on failure.
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Report one finished test. Output is flushed before returning so
    /// reports never interleave out of execution order.
    pub fn report(&mut self, result: &TestResult) -> io::Result<()> {
        let code = result.exit_code;

        if self.policy.should_print(Selector::Stdout, code) {
            self.out.write_all(&result.stdout)?;
            self.out.flush()?;
        }
        if self.policy.should_print(Selector::Stderr, code) {
            self.err.write_all(&result.stderr)?;
        }
        if !self.quiet && self.policy.should_print(Selector::Result, code) {
            writeln!(self.err, "{}", status_line(result, self.colorize))?;
        }
        self.err.flush()
    }

    /// Stream used for run-level output such as dry-run listings.
    pub fn stdout(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// `[exit_code] path`, optionally wrapped in green/red.
pub fn status_line(result: &TestResult, colorize: bool) -> String {
    let line = format!("[{}] {}", result.exit_code, result.path.display());
    if !colorize {
        return line;
    }
    let color = if result.passed() { GREEN } else { RED };
    format!("{color}{line}{RESET}")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
