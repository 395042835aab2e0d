// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Private scratch directory for captured test streams
//!
//! Holds at most three files: `stdin` (the buffered run input, when forked),
//! `stdout` and `stderr` (overwritten by every test). The directory is
//! removed when the [`Workspace`] is released or dropped, so it cannot
//! outlive the run on any return path, including cancellation.

use crate::error::WorkspaceError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::AsyncRead;

const STDIN_FILE: &str = "stdin";
const STDOUT_FILE: &str = "stdout";
const STDERR_FILE: &str = "stderr";

/// Owner-only scratch directory, removed on drop.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a uniquely named, owner-only directory under `root`.
    pub fn acquire(root: &Path) -> Result<Self, WorkspaceError> {
        if !root.is_dir() {
            return Err(WorkspaceError::MissingRoot(root.to_path_buf()));
        }

        let create_err = |source| WorkspaceError::Create {
            root: root.to_path_buf(),
            source,
        };
        let dir = tempfile::Builder::new()
            .prefix(&format!("harn.{}.", std::process::id()))
            .tempdir_in(root)
            .map_err(create_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o700))
                .map_err(create_err)?;
        }

        tracing::debug!(path = %dir.path().display(), "acquired workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn stdin_path(&self) -> PathBuf {
        self.dir.path().join(STDIN_FILE)
    }

    pub fn stdout_path(&self) -> PathBuf {
        self.dir.path().join(STDOUT_FILE)
    }

    pub fn stderr_path(&self) -> PathBuf {
        self.dir.path().join(STDERR_FILE)
    }

    /// Read `input` to completion into the `stdin` file.
    ///
    /// Returns the number of bytes buffered.
    pub async fn buffer_stdin<R>(&self, mut input: R) -> Result<u64, WorkspaceError>
    where
        R: AsyncRead + Unpin,
    {
        let path = self.stdin_path();
        let io_err = |source| WorkspaceError::Io {
            path: path.clone(),
            source,
        };
        let mut file = tokio::fs::File::create(&path).await.map_err(io_err)?;
        let copied = tokio::io::copy(&mut input, &mut file)
            .await
            .map_err(io_err)?;
        tracing::debug!(bytes = copied, "buffered stdin");
        Ok(copied)
    }

    /// Remove the directory and everything in it, reporting failures.
    pub fn release(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| WorkspaceError::Remove { path, source })
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
