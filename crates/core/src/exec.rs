// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential test execution
//!
//! Each test is spawned via [`tokio::process::Command`] with stdout and
//! stderr redirected into the workspace, and fully awaited before the next
//! one starts. The child is killed if the run is cancelled mid-test.

use crate::config::Anomaly;
use crate::error::{RunError, WorkspaceError};
use crate::outcome::RunOutcome;
use crate::policy::Policy;
use crate::report::Reporter;
use crate::resolve::TestCandidate;
use crate::workspace::Workspace;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Exit code recorded when the test binary cannot be found at spawn time.
const EXIT_NOT_FOUND: i32 = 127;
/// Exit code recorded for any other spawn failure.
const EXIT_CANNOT_EXECUTE: i32 = 126;
/// Interpreter for executables that lack a `#!` line.
const SHELL: &str = "/bin/sh";

/// Outcome of one test run. Captured streams may contain any bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub path: PathBuf,
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs candidates one at a time inside a [`Workspace`].
#[derive(Debug)]
pub struct Executor<'a> {
    workspace: &'a Workspace,
    params: &'a [String],
    fork_stdin: bool,
}

impl<'a> Executor<'a> {
    pub fn new(workspace: &'a Workspace, params: &'a [String]) -> Self {
        Self {
            workspace,
            params,
            fork_stdin: false,
        }
    }

    /// Feed every test the buffered `stdin` file from the workspace.
    pub fn fork_stdin(mut self, yes: bool) -> Self {
        self.fork_stdin = yes;
        self
    }

    /// Build the test command with fresh stream redirections.
    ///
    /// When `script` is given, `program` is the interpreter and `script` its
    /// first argument.
    fn command(&self, program: &Path, script: Option<&Path>) -> Result<Command, WorkspaceError> {
        let stdin = if self.fork_stdin {
            let path = self.workspace.stdin_path();
            Stdio::from(File::open(&path).map_err(|source| WorkspaceError::Io { path, source })?)
        } else {
            Stdio::null()
        };

        let mut cmd = Command::new(program);
        if let Some(script) = script {
            cmd.arg(script);
        }
        cmd.args(self.params)
            .stdin(stdin)
            .stdout(create(&self.workspace.stdout_path())?)
            .stderr(create(&self.workspace.stderr_path())?)
            .kill_on_drop(true);
        Ok(cmd)
    }

    /// Run a single test and collect its result.
    pub async fn run_one(&self, candidate: &TestCandidate) -> Result<TestResult, WorkspaceError> {
        let stdout_path = self.workspace.stdout_path();
        let stderr_path = self.workspace.stderr_path();

        let program = invocation_path(candidate.path());
        debug!(test = %program.display(), params = ?self.params, "launching test");

        // No `#!` line: run it with the shell, as execvp does
        let status = match self.command(&program, None)?.status().await {
            Err(e) if is_exec_format_error(&e) => {
                debug!(test = %program.display(), "no interpreter line, running with {SHELL}");
                self.command(Path::new(SHELL), Some(&program))?.status().await
            }
            status => status,
        };

        let exit_code = match status {
            Ok(status) => exit_code_of(status),
            Err(e) => {
                debug!(test = %program.display(), error = %e, "failed to spawn test");
                let message = format!("harn: {}: {e}\n", candidate.path().display());
                std::fs::write(&stderr_path, message).map_err(|source| WorkspaceError::Io {
                    path: stderr_path.clone(),
                    source,
                })?;
                spawn_failure_code(&e)
            }
        };
        debug!(test = %program.display(), exit_code, "test finished");

        Ok(TestResult {
            path: candidate.path().to_path_buf(),
            exit_code,
            stdout: read(&stdout_path).await?,
            stderr: read(&stderr_path).await?,
        })
    }

    /// Run every candidate in order, reporting each result as it completes.
    ///
    /// When the policy halts on failed tests, the loop stops right after
    /// reporting the first non-zero result.
    pub async fn run_all<O, E>(
        &self,
        candidates: &[TestCandidate],
        policy: &Policy,
        reporter: &mut Reporter<O, E>,
    ) -> Result<RunOutcome, RunError>
    where
        O: Write,
        E: Write,
    {
        let mut outcome = RunOutcome::new();
        for candidate in candidates {
            let result = self.run_one(candidate).await?;
            reporter.report(&result)?;
            outcome.record(&result);

            if !result.passed() && policy.should_halt_on(Anomaly::FailedTest) {
                debug!(test = %result.path.display(), "halting after failed test");
                outcome.halt(&result.path);
                break;
            }
        }
        tracing::info!(
            passed = outcome.passed(),
            failed = outcome.failed(),
            halted = outcome.halted_early(),
            "run finished"
        );
        Ok(outcome)
    }
}

/// List the invocations a run would make without spawning anything.
///
/// One line per candidate: the quoted path, a space, and the quoted,
/// space-joined parameter string. Embedded `"` and `\` are backslash-escaped.
pub fn dry_run<W: Write>(candidates: &[TestCandidate], params: &[String], out: &mut W) -> io::Result<()> {
    let joined = quote(&params.join(" "));
    for candidate in candidates {
        let path = quote(&candidate.path().to_string_lossy());
        writeln!(out, "{path} {joined}")?;
    }
    out.flush()
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Bare relative names would be looked up on `PATH`; anchor them to `.`.
fn invocation_path(path: &Path) -> PathBuf {
    if path.is_relative() && path.components().count() == 1 {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(unix)]
fn is_exec_format_error(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ENOEXEC)
}

#[cfg(not(unix))]
fn is_exec_format_error(_err: &io::Error) -> bool {
    false
}

fn spawn_failure_code(err: &io::Error) -> i32 {
    if err.kind() == io::ErrorKind::NotFound {
        EXIT_NOT_FOUND
    } else {
        EXIT_CANNOT_EXECUTE
    }
}

fn create(path: &Path) -> Result<File, WorkspaceError> {
    File::create(path).map_err(|source| WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn read(path: &Path) -> Result<Vec<u8>, WorkspaceError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
