// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line options and their translation into a [`RunConfig`]

use clap::{Parser, ValueEnum};
use harn_core::{Anomaly, ConfigError, PrintWhen, RunConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "harn",
    version,
    about = "Run every executable under the given paths as a test",
    styles = crate::color::styles(),
    after_help = "\
Exit status:
  0  all executed tests passed (or dry run completed)
  1  internal error
  2  invalid configuration
  4  a test path failed validation
  8  one or more tests failed"
)]
pub struct Cli {
    /// Include hidden entries when expanding directories
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Expand directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not print per-test status lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Read stdin once and replay it to every test
    #[arg(short = 'i', long = "stdin")]
    pub fork_stdin: bool,

    /// Print the invocations that would run, without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Abort the run when this anomaly is detected (repeatable)
    #[arg(long = "halt-on", value_name = "KIND", value_enum)]
    pub halt_on: Vec<AnomalyArg>,

    /// Continue the run when this anomaly is detected (repeatable)
    #[arg(long = "ignore", value_name = "KIND", value_enum)]
    pub ignore: Vec<AnomalyArg>,

    /// When to print the `[code] path` status line
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = WhenArg::Always)]
    pub print_result: WhenArg,

    /// When to echo a test's captured stdout
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = WhenArg::Never)]
    pub print_stdout: WhenArg,

    /// When to echo a test's captured stderr
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = WhenArg::Failure)]
    pub print_stderr: WhenArg,

    /// Directory to create the scratch workspace in [default: $HARN_TMPDIR or the system temp dir]
    #[arg(long, value_name = "DIR")]
    pub temp_root: Option<PathBuf>,

    /// Test files or directories of test files
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Arguments passed to every test
    #[arg(value_name = "TEST_ARGS", last = true)]
    pub test_args: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyArg {
    #[value(alias = "missing_test")]
    MissingTest,
    #[value(alias = "non_exec")]
    NonExec,
    #[value(alias = "no_tests")]
    NoTests,
    #[value(alias = "failed_test")]
    FailedTest,
}

impl From<AnomalyArg> for Anomaly {
    fn from(arg: AnomalyArg) -> Self {
        match arg {
            AnomalyArg::MissingTest => Anomaly::MissingTest,
            AnomalyArg::NonExec => Anomaly::NonExec,
            AnomalyArg::NoTests => Anomaly::NoTests,
            AnomalyArg::FailedTest => Anomaly::FailedTest,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhenArg {
    Always,
    Failure,
    Success,
    Never,
}

impl From<WhenArg> for PrintWhen {
    fn from(arg: WhenArg) -> Self {
        match arg {
            WhenArg::Always => PrintWhen::Always,
            WhenArg::Failure => PrintWhen::Failure,
            WhenArg::Success => PrintWhen::Success,
            WhenArg::Never => PrintWhen::Never,
        }
    }
}

impl Cli {
    /// Build the run configuration, falling back to the environment for
    /// the temp root.
    pub fn into_config(self) -> Result<RunConfig, ConfigError> {
        let temp_root = self.temp_root.unwrap_or_else(crate::env::temp_root);

        let builder = RunConfig::builder(temp_root)
            .include_hidden(self.all)
            .recursive(self.recursive)
            .quiet(self.quiet)
            .fork_stdin(self.fork_stdin)
            .dry_run(self.dry_run)
            .test_paths(self.paths)
            .test_params(self.test_args)
            .print_result(self.print_result.into())
            .print_stdout(self.print_stdout.into())
            .print_stderr(self.print_stderr.into());

        let builder = self
            .halt_on
            .into_iter()
            .fold(builder, |b, kind| b.halt_on(kind.into()));
        let builder = self
            .ignore
            .into_iter()
            .fold(builder, |b, kind| b.ignore(kind.into()));

        builder.build()
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
