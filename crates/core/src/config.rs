// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration
//!
//! [`RunConfig`] is assembled once through [`RunConfigBuilder`], validated,
//! and never mutated afterwards. Every later stage borrows it.

use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A detected deviation whose handling (halt vs. ignore) is policy-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anomaly {
    /// A top-level test path does not exist
    MissingTest,
    /// A top-level test path exists but is not executable
    NonExec,
    /// Path resolution produced no runnable tests
    NoTests,
    /// A test exited non-zero
    FailedTest,
}

impl Anomaly {
    pub const ALL: [Anomaly; 4] = [
        Anomaly::MissingTest,
        Anomaly::NonExec,
        Anomaly::NoTests,
        Anomaly::FailedTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anomaly::MissingTest => "missing_test",
            Anomaly::NonExec => "non_exec",
            Anomaly::NoTests => "no_tests",
            Anomaly::FailedTest => "failed_test",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anomaly {
    type Err = ConfigError;

    /// Accepts both `missing_test` and `missing-test` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Anomaly::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownAnomaly(s.to_string()))
    }
}

/// When a captured stream or status line is echoed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintWhen {
    Always,
    Failure,
    Success,
    Never,
}

impl PrintWhen {
    /// Whether a test finishing with `exit_code` selects this output.
    pub fn matches(self, exit_code: i32) -> bool {
        match self {
            PrintWhen::Always => true,
            PrintWhen::Never => false,
            PrintWhen::Success => exit_code == 0,
            PrintWhen::Failure => exit_code != 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrintWhen::Always => "always",
            PrintWhen::Failure => "failure",
            PrintWhen::Success => "success",
            PrintWhen::Never => "never",
        }
    }
}

impl fmt::Display for PrintWhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintWhen {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always" => Ok(PrintWhen::Always),
            "failure" => Ok(PrintWhen::Failure),
            "success" => Ok(PrintWhen::Success),
            "never" => Ok(PrintWhen::Never),
            other => Err(ConfigError::UnknownSelector(other.to_string())),
        }
    }
}

/// Halt decision for each [`Anomaly`]. Every kind always has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaltOn {
    missing_test: bool,
    non_exec: bool,
    no_tests: bool,
    failed_test: bool,
}

impl Default for HaltOn {
    fn default() -> Self {
        Self {
            missing_test: true,
            non_exec: false,
            no_tests: true,
            failed_test: false,
        }
    }
}

impl HaltOn {
    pub fn get(&self, anomaly: Anomaly) -> bool {
        match anomaly {
            Anomaly::MissingTest => self.missing_test,
            Anomaly::NonExec => self.non_exec,
            Anomaly::NoTests => self.no_tests,
            Anomaly::FailedTest => self.failed_test,
        }
    }

    /// Return a copy with the decision for `anomaly` replaced.
    pub fn with(mut self, anomaly: Anomaly, halt: bool) -> Self {
        let slot = match anomaly {
            Anomaly::MissingTest => &mut self.missing_test,
            Anomaly::NonExec => &mut self.non_exec,
            Anomaly::NoTests => &mut self.no_tests,
            Anomaly::FailedTest => &mut self.failed_test,
        };
        *slot = halt;
        self
    }
}

/// Display selectors for the status line and the two captured streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selectors {
    pub result: PrintWhen,
    pub stdout: PrintWhen,
    pub stderr: PrintWhen,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            result: PrintWhen::Always,
            stdout: PrintWhen::Never,
            stderr: PrintWhen::Failure,
        }
    }
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    include_hidden: bool,
    recursive: bool,
    quiet: bool,
    fork_stdin: bool,
    dry_run: bool,
    test_params: Vec<String>,
    halt_on: HaltOn,
    selectors: Selectors,
    temp_root: PathBuf,
    test_paths: Vec<PathBuf>,
}

impl RunConfig {
    pub fn builder(temp_root: impl Into<PathBuf>) -> RunConfigBuilder {
        RunConfigBuilder::new(temp_root)
    }

    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn fork_stdin(&self) -> bool {
        self.fork_stdin
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn test_params(&self) -> &[String] {
        &self.test_params
    }

    pub fn halt_on(&self) -> HaltOn {
        self.halt_on
    }

    pub fn selectors(&self) -> Selectors {
        self.selectors
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    pub fn test_paths(&self) -> &[PathBuf] {
        &self.test_paths
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    include_hidden: bool,
    recursive: bool,
    quiet: bool,
    fork_stdin: bool,
    dry_run: bool,
    test_params: Vec<String>,
    halt: Vec<Anomaly>,
    ignore: Vec<Anomaly>,
    selectors: Selectors,
    temp_root: PathBuf,
    test_paths: Vec<PathBuf>,
}

impl RunConfigBuilder {
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            include_hidden: false,
            recursive: false,
            quiet: false,
            fork_stdin: false,
            dry_run: false,
            test_params: Vec::new(),
            halt: Vec::new(),
            ignore: Vec::new(),
            selectors: Selectors::default(),
            temp_root: temp_root.into(),
            test_paths: Vec::new(),
        }
    }

    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    pub fn fork_stdin(mut self, yes: bool) -> Self {
        self.fork_stdin = yes;
        self
    }

    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    /// Arguments passed verbatim, in order, to every test.
    pub fn test_params(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.test_params.extend(params.into_iter().map(Into::into));
        self
    }

    pub fn test_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_paths.push(path.into());
        self
    }

    pub fn test_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.test_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn halt_on(mut self, anomaly: Anomaly) -> Self {
        self.halt.push(anomaly);
        self
    }

    pub fn ignore(mut self, anomaly: Anomaly) -> Self {
        self.ignore.push(anomaly);
        self
    }

    pub fn print_result(mut self, when: PrintWhen) -> Self {
        self.selectors.result = when;
        self
    }

    pub fn print_stdout(mut self, when: PrintWhen) -> Self {
        self.selectors.stdout = when;
        self
    }

    pub fn print_stderr(mut self, when: PrintWhen) -> Self {
        self.selectors.stderr = when;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        if self.test_paths.is_empty() {
            return Err(ConfigError::NoTestPaths);
        }
        if let Some(conflict) = self.halt.iter().find(|a| self.ignore.contains(a)) {
            return Err(ConfigError::ConflictingPolicy(*conflict));
        }

        let halt_on = self
            .halt
            .iter()
            .map(|a| (*a, true))
            .chain(self.ignore.iter().map(|a| (*a, false)))
            .fold(HaltOn::default(), |acc, (anomaly, halt)| {
                acc.with(anomaly, halt)
            });

        Ok(RunConfig {
            include_hidden: self.include_hidden,
            recursive: self.recursive,
            quiet: self.quiet,
            fork_stdin: self.fork_stdin,
            dry_run: self.dry_run,
            test_params: self.test_params,
            halt_on,
            selectors: self.selectors,
            temp_root: self.temp_root,
            test_paths: self.test_paths,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
