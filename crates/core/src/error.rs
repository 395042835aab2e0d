// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy and the process exit codes it maps onto

use crate::config::Anomaly;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes. These values are a public contract.
pub mod exit_code {
    /// Every executed test succeeded (or a dry run completed)
    pub const SUCCESS: i32 = 0;
    /// Unmanaged or internal error
    pub const INTERNAL: i32 = 1;
    /// Invalid configuration value
    pub const CONFIG: i32 = 2;
    /// A test path failed validation under an active halt policy
    pub const PATH_VALIDATION: i32 = 4;
    /// One or more tests exited non-zero
    pub const TESTS_FAILED: i32 = 8;
}

/// Invalid run configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown anomaly kind: {0}")]
    UnknownAnomaly(String),
    #[error("unknown print selector: {0} (expected always, failure, success or never)")]
    UnknownSelector(String),
    #[error("no test paths supplied")]
    NoTestPaths,
    #[error("{0} is both halted on and ignored")]
    ConflictingPolicy(Anomaly),
}

/// A top-level test path anomaly that the halt policy turned into an abort
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("test path missing: {}", .0.display())]
    Missing(PathBuf),
    #[error("test path not executable: {}", .0.display())]
    NotExecutable(PathBuf),
    #[error("no files to execute")]
    NoTests,
}

/// Failure to set up, use, or tear down the scratch workspace
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("temp root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("failed to create workspace in {}: {source}", root.display())]
    Create {
        root: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove workspace {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("workspace I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Any reason a run ends with a non-zero exit status
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("{failed} of {total} tests failed")]
    TestsFailed { failed: usize, total: usize },
    #[error("halted after failed test: {}", .0.display())]
    HaltedOnFailure(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Exit status the process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => exit_code::CONFIG,
            RunError::Resolve(_) => exit_code::PATH_VALIDATION,
            RunError::TestsFailed { .. } | RunError::HaltedOnFailure(_) => exit_code::TESTS_FAILED,
            RunError::Workspace(_) | RunError::Io(_) => exit_code::INTERNAL,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
