// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end run: resolve, set up the workspace, execute, report

use crate::config::RunConfig;
use crate::error::RunError;
use crate::exec::{dry_run, Executor};
use crate::outcome::RunOutcome;
use crate::policy::Policy;
use crate::report::Reporter;
use crate::resolve::{resolve, WalkOptions};
use crate::workspace::Workspace;
use std::io::Write;
use tokio::io::AsyncRead;

/// Run every test named by `config`.
///
/// `stdin` is only read (to completion, once) when stdin forking is on.
/// Returns `Ok` only if every executed test passed; failures surface as
/// [`RunError::TestsFailed`] or [`RunError::HaltedOnFailure`]. The workspace
/// is removed before this returns, whichever way it returns, and also if the
/// returned future is dropped mid-run.
pub async fn run<O, E, R>(
    config: &RunConfig,
    stdin: R,
    reporter: &mut Reporter<O, E>,
) -> Result<RunOutcome, RunError>
where
    O: Write,
    E: Write,
    R: AsyncRead + Unpin,
{
    let policy = Policy::from_config(config);
    let resolution = resolve(config.test_paths(), WalkOptions::from(config), &policy)?;

    if config.dry_run() {
        dry_run(resolution.tests(), config.test_params(), reporter.stdout())?;
        return Ok(RunOutcome::new());
    }

    let workspace = Workspace::acquire(config.temp_root())?;
    if config.fork_stdin() {
        workspace.buffer_stdin(stdin).await?;
    }

    let outcome = Executor::new(&workspace, config.test_params())
        .fork_stdin(config.fork_stdin())
        .run_all(resolution.tests(), &policy, reporter)
        .await;
    let released = workspace.release();

    let outcome = outcome?;
    released?;
    outcome.into_result()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
