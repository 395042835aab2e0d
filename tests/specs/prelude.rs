//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing harn CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale (e.g. a shared target directory).
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/ where harn is built.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Returns the path to the harn binary.
fn harn_binary() -> PathBuf {
    binary_path("harn")
}

/// Create a CLI builder for harn commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    removed: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![("NO_COLOR".into(), "1".into())],
            removed: vec!["COLOR".into(), "HARN_LOG".into(), "HARN_TMPDIR".into()],
            stdin: None,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Force colored status lines
    pub fn colored(mut self) -> Self {
        self.envs.retain(|(k, _)| k != "NO_COLOR");
        self.removed.push("NO_COLOR".into());
        self.env("COLOR", "1")
    }

    /// Feed bytes to the process's stdin
    pub fn stdin(mut self, bytes: &[u8]) -> Self {
        self.stdin = Some(bytes.to_vec());
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(harn_binary());
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for key in self.removed {
            cmd.env_remove(key);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Spawn without waiting (stdout/stderr piped, stdin closed)
    pub fn spawn(self) -> Child {
        let mut cmd = self.command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd.spawn().expect("command should spawn")
    }

    fn output(self) -> Output {
        let stdin = self.stdin.clone();
        let mut cmd = self.command();
        match stdin {
            None => cmd.output().expect("command should run"),
            Some(bytes) => {
                cmd.stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let mut child = cmd.spawn().expect("command should spawn");
                {
                    let mut input = child.stdin.take().expect("stdin is piped");
                    input.write_all(&bytes).expect("write stdin");
                }
                child.wait_with_output().expect("command should finish")
            }
        }
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect a specific non-zero exit code
    pub fn fails_with(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        let stderr = self.stderr();
        similar_asserts::assert_eq!(stderr, expected);
        self
    }

    /// Assert raw stdout bytes equal expected
    pub fn stdout_bytes(self, expected: &[u8]) -> Self {
        assert_eq!(self.output.stdout, expected);
        self
    }

    /// Assert raw stderr bytes equal expected
    pub fn stderr_bytes(self, expected: &[u8]) -> Self {
        assert_eq!(self.output.stderr, expected);
        self
    }

    /// Assert stdout lines, ignoring order
    pub fn stdout_lines_unordered(self, expected: &[&str]) -> Self {
        let stdout = self.stdout();
        let mut actual: Vec<&str> = stdout.lines().collect();
        actual.sort_unstable();
        let mut expected = expected.to_vec();
        expected.sort_unstable();
        similar_asserts::assert_eq!(actual, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert stderr does not contain substring.
    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

// =============================================================================
// Polling
// =============================================================================

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);
    let poll_interval = std::time::Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

// =============================================================================
// Project
// =============================================================================

/// Temporary directory of test programs with helper methods.
pub struct Project {
    dir: tempfile::TempDir,
    /// Isolated temp root for harn workspaces
    temp_root: tempfile::TempDir,
}

impl Project {
    /// Create an empty project
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            temp_root: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write an executable `/bin/sh` test program
    pub fn test(&self, path: impl AsRef<Path>, body: &str) {
        self.file(path.as_ref(), &format!("#!/bin/sh\n{body}\n"));
        let full_path = self.dir.path().join(path.as_ref());
        std::fs::set_permissions(full_path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Create an empty directory
    pub fn dir(&self, path: impl AsRef<Path>) {
        std::fs::create_dir_all(self.dir.path().join(path)).unwrap();
    }

    /// Whether a file exists (e.g. a marker a test program touched)
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.dir.path().join(path).exists()
    }

    /// Get the isolated temp root path
    pub fn temp_root(&self) -> &Path {
        self.temp_root.path()
    }

    /// Number of entries left in the temp root (leaked workspaces)
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.temp_root()).unwrap().count()
    }

    /// Run harn in this project's context
    pub fn harn(&self) -> CliBuilder {
        cli()
            .pwd(self.path())
            .env("HARN_TMPDIR", self.temp_root())
    }
}
