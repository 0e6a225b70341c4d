//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for testing the
//! envvars library.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use envvars::sources::Decryptor;
use envvars::{Error, Result, VarMap};
use tempfile::TempDir;

/// A scratch directory holding source files for one test.
pub struct Workspace {
    dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary directory"),
        }
    }

    /// Root of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` (creating parent directories) and returns
    /// the full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("failed to write fixture");
        path
    }
}

/// Builds a [`VarMap`] from literal pairs.
#[allow(dead_code)]
pub fn vars(pairs: &[(&str, &str)]) -> VarMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Decryptor that serves canned plaintext keyed by file name.
#[derive(Default)]
pub struct CannedDecryptor {
    plaintexts: HashMap<String, String>,
}

#[allow(dead_code)]
impl CannedDecryptor {
    /// Registers `plaintext` for any path whose file name is `name`.
    pub fn with(mut self, name: &str, plaintext: &str) -> Self {
        self.plaintexts
            .insert(name.to_string(), plaintext.to_string());
        self
    }
}

impl Decryptor for CannedDecryptor {
    fn decrypt(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.plaintexts
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Decryption {
                path: path.to_path_buf(),
                message: "no plaintext registered".to_string(),
            })
    }
}
