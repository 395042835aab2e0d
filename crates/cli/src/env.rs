// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

// --- Temp root ---

/// Resolve the workspace temp root: HARN_TMPDIR > TMPDIR > platform default
pub fn temp_root() -> PathBuf {
    std::env::var_os("HARN_TMPDIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

// --- Logging ---

/// Log filter directive (tracing-subscriber `EnvFilter` syntax)
pub fn log_filter() -> Option<String> {
    std::env::var("HARN_LOG").ok().filter(|s| !s.is_empty())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
