//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers isolated from the caller's environment
//! - Fixture writers for source files and manifests

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak the caller's settings into a test.
const ISOLATED_VARS: &[&str] = &[
    "ENVVARS_CONFIG",
    "ENVVARS_FORMAT",
    "ENVVARS_SOPS_AGE_KEY_FILE",
    "ENVVARS_LOG_MODE",
];

/// Test environment rooted in a temporary directory.
///
/// Commands run with the temporary directory as their working directory, so
/// manifest discovery only sees files written by the test.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the envvars binary.
    ///
    /// The command runs inside the temp directory with every `ENVVARS_*`
    /// variable removed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("envvars").expect("Failed to find envvars binary");
        cmd.current_dir(&self.temp_path);
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the temp directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `merge` with the given arguments and return stdout.
    ///
    /// Panics if the command fails.
    pub fn merge(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("merge")
            .args(args)
            .output()
            .expect("Failed to run merge");

        assert!(
            output.status.success(),
            "merge failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Run `merge --format json` and parse the result.
    pub fn merge_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        let stdout = self.merge(&full);
        serde_json::from_str(&stdout).expect("merge did not print valid JSON")
    }
}
