// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! harn-core: orchestration engine for the harn test runner
//!
//! A run flows through these stages:
//! - [`resolve`]: expand user paths into an ordered list of test candidates
//! - [`workspace`]: private scratch directory for captured streams
//! - [`exec`]: sequential subprocess execution (or a dry run)
//! - [`report`]: selective echo of captured output and status lines
//!
//! [`runner::run`] wires the stages together.

pub mod config;
pub mod error;
pub mod exec;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod runner;
pub mod workspace;


pub use config::{Anomaly, HaltOn, PrintWhen, RunConfig, RunConfigBuilder, Selectors};
pub use error::{exit_code, ConfigError, ResolveError, RunError, WorkspaceError};
pub use exec::{dry_run, Executor, TestResult};
pub use outcome::RunOutcome;
pub use policy::{Policy, Selector};
pub use report::Reporter;
pub use resolve::{resolve, walk, CandidateKind, Resolution, TestCandidate, WalkOptions};
pub use runner::run;
pub use workspace::Workspace;
