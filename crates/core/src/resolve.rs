// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path resolution: user-supplied paths to an ordered list of runnable tests
//!
//! Top-level paths keep their given order. A directory is expanded in place,
//! in the order the filesystem walk yields entries (not sorted). Only
//! anomalies of top-level paths are reported; non-executable or non-regular
//! entries found inside a directory are skipped silently.

use crate::config::{Anomaly, RunConfig};
use crate::error::ResolveError;
use crate::policy::Policy;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Classification of a path at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    RegularExecutable,
    Directory,
    Missing,
    NotExecutable,
}

/// A path plus its classification. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCandidate {
    path: PathBuf,
    kind: CandidateKind,
}

impl TestCandidate {
    /// Classify `path` by looking at the filesystem (symlinks are followed).
    pub fn classify(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = match fs::metadata(&path) {
            Err(_) => CandidateKind::Missing,
            Ok(meta) if !is_executable(&meta) => CandidateKind::NotExecutable,
            Ok(meta) if meta.is_dir() => CandidateKind::Directory,
            Ok(meta) if meta.is_file() => CandidateKind::RegularExecutable,
            Ok(_) => CandidateKind::NotExecutable,
        };
        Self { path, kind }
    }

    /// A candidate already known to be a regular executable file.
    pub fn runnable(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: CandidateKind::RegularExecutable,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    pub fn is_runnable(&self) -> bool {
        self.kind == CandidateKind::RegularExecutable
    }
}

/// Directory expansion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkOptions {
    /// Consider entries whose name begins with `.`
    pub include_hidden: bool,
    /// Expand the full descendant tree instead of direct children only
    pub recursive: bool,
}

impl From<&RunConfig> for WalkOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            include_hidden: config.include_hidden(),
            recursive: config.recursive(),
        }
    }
}

/// Result of resolving the top-level path list.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    tests: Vec<TestCandidate>,
    skipped: Vec<TestCandidate>,
}

impl Resolution {
    /// Runnable tests, in run order.
    pub fn tests(&self) -> &[TestCandidate] {
        &self.tests
    }

    /// Top-level anomalies the halt policy chose to drop.
    pub fn skipped(&self) -> &[TestCandidate] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Lazily walk `dir`, yielding executable regular files.
///
/// Hidden entries are pruned unless `include_hidden` is set; in recursive
/// mode a pruned hidden directory is not descended into. Walk order is
/// depth-first and follows the filesystem's enumeration order.
pub fn walk(dir: &Path, options: WalkOptions) -> impl Iterator<Item = PathBuf> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| options.include_hidden || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| {
            entry
                .metadata()
                .is_ok_and(|meta| meta.is_file() && is_executable(&meta))
        })
        .map(DirEntry::into_path)
}

/// Resolve `paths` into runnable candidates, consulting `policy` for every
/// top-level anomaly.
pub fn resolve(
    paths: &[PathBuf],
    options: WalkOptions,
    policy: &Policy,
) -> Result<Resolution, ResolveError> {
    let mut resolution = Resolution::default();

    for path in paths {
        let candidate = TestCandidate::classify(path);
        match candidate.kind() {
            CandidateKind::RegularExecutable => {
                debug!(path = %path.display(), "resolved test");
                resolution.tests.push(candidate);
            }
            CandidateKind::Directory => {
                let before = resolution.tests.len();
                resolution
                    .tests
                    .extend(walk(path, options).map(TestCandidate::runnable));
                debug!(
                    dir = %path.display(),
                    count = resolution.tests.len() - before,
                    "expanded test directory"
                );
            }
            CandidateKind::Missing => {
                if policy.should_halt_on(Anomaly::MissingTest) {
                    return Err(ResolveError::Missing(path.clone()));
                }
                debug!(path = %path.display(), "ignoring missing test path");
                resolution.skipped.push(candidate);
            }
            CandidateKind::NotExecutable => {
                if policy.should_halt_on(Anomaly::NonExec) {
                    return Err(ResolveError::NotExecutable(path.clone()));
                }
                debug!(path = %path.display(), "ignoring non-executable test path");
                resolution.skipped.push(candidate);
            }
        }
    }

    if resolution.is_empty() && policy.should_halt_on(Anomaly::NoTests) {
        return Err(ResolveError::NoTests);
    }
    Ok(resolution)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(unix)]
fn is_executable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &Metadata) -> bool {
    true
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
