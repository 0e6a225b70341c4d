//! SOPS-encrypted sources.
//!
//! Decryption is delegated to the `sops` binary through the [`Decryptor`]
//! trait. The decrypted YAML is flattened so that nested keys become
//! `PARENT_CHILD` variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_yaml::{Mapping, Value};

use super::SourceProcessor;
use crate::env::{is_valid_key, VarMap};
use crate::error::{Error, Result};

/// Environment variable `sops` reads the age identity file from.
pub const AGE_KEY_FILE_ENV: &str = "SOPS_AGE_KEY_FILE";

/// Top-level key holding SOPS metadata in encrypted documents.
const METADATA_KEY: &str = "sops";

/// Turns an encrypted file into plaintext YAML.
#[cfg_attr(test, mockall::automock)]
pub trait Decryptor {
    /// Decrypts the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decryption`] if the file cannot be decrypted.
    fn decrypt(&self, path: &Path) -> Result<String>;
}

/// Decrypts by running `sops --decrypt --output-type yaml <path>`.
#[derive(Debug, Clone)]
pub struct SopsCli {
    binary: PathBuf,
    age_key_file: Option<PathBuf>,
}

impl SopsCli {
    /// Creates a decryptor that runs `sops` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("sops"),
            age_key_file: None,
        }
    }

    /// Uses a different `sops` executable.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Passes an age identity file to `sops` via `SOPS_AGE_KEY_FILE`.
    #[must_use]
    pub fn with_age_key_file(mut self, key_file: impl Into<PathBuf>) -> Self {
        self.age_key_file = Some(key_file.into());
        self
    }
}

impl Default for SopsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Decryptor for SopsCli {
    fn decrypt(&self, path: &Path) -> Result<String> {
        let failure = |message: String| Error::Decryption {
            path: path.to_path_buf(),
            message,
        };

        let mut command = Command::new(&self.binary);
        command
            .args(["--decrypt", "--output-type", "yaml"])
            .arg(path);
        if let Some(key_file) = &self.age_key_file {
            command.env(AGE_KEY_FILE_ENV, key_file);
        }

        log::debug!("running {} --decrypt on {}", self.binary.display(), path.display());

        let output = command
            .output()
            .map_err(|e| failure(format!("failed to run '{}': {e}", self.binary.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(format!(
                "sops exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| failure(format!("decrypted output is not UTF-8: {e}")))
    }
}

/// Loads a SOPS file through a [`Decryptor`] and flattens the plaintext.
pub struct SopsProcessor<'a> {
    decryptor: &'a dyn Decryptor,
}

impl<'a> SopsProcessor<'a> {
    /// Creates a processor that decrypts with `decryptor`.
    #[must_use]
    pub fn new(decryptor: &'a dyn Decryptor) -> Self {
        Self { decryptor }
    }
}

impl SourceProcessor for SopsProcessor<'_> {
    fn load(&self, path: &Path) -> Result<VarMap> {
        fs::metadata(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;

        let plaintext = self.decryptor.decrypt(path)?;
        let document: Value = serde_yaml::from_str(&plaintext).map_err(|e| Error::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;

        match document {
            Value::Mapping(mut mapping) => {
                mapping.remove(METADATA_KEY);
                Ok(flatten("", &mapping))
            }
            Value::Null => Err(Error::InvalidDocument {
                path: path.to_path_buf(),
                reason: "decrypted document is empty".to_string(),
            }),
            _ => Err(Error::InvalidDocument {
                path: path.to_path_buf(),
                reason: "top level must be a mapping".to_string(),
            }),
        }
    }
}

/// Flattens a nested mapping into upper-case `PARENT_CHILD` variables.
///
/// Sequences of scalars become comma-joined values. A key that is not a valid
/// identifier is skipped together with everything beneath it.
///
/// # Examples
///
/// ```
/// use envvars::sources::flatten;
///
/// let mapping: serde_yaml::Mapping = serde_yaml::from_str(
///     "database:\n  host: db.internal\n  port: 5432\nhosts: [a, b]\n",
/// )
/// .unwrap();
///
/// let vars = flatten("", &mapping);
/// assert_eq!(vars["DATABASE_HOST"], "db.internal");
/// assert_eq!(vars["DATABASE_PORT"], "5432");
/// assert_eq!(vars["HOSTS"], "a,b");
/// ```
#[must_use]
pub fn flatten(prefix: &str, mapping: &Mapping) -> VarMap {
    let mut vars = VarMap::new();

    for (key, value) in mapping {
        let Some(key) = scalar_text(key) else {
            continue;
        };
        if !is_valid_key(&key) {
            log::debug!("skipping invalid key {key:?} under {prefix:?}");
            continue;
        }

        let name = if prefix.is_empty() {
            key.to_uppercase()
        } else {
            format!("{prefix}_{}", key.to_uppercase())
        };

        match value {
            Value::Mapping(nested) => vars.extend(flatten(&name, nested)),
            Value::Sequence(items) => {
                let joined: Vec<String> = items.iter().map(render).collect();
                vars.insert(name, joined.join(","));
            }
            other => {
                vars.insert(name, render(other));
            }
        }
    }

    vars
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Tagged(tagged) => render(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        scalar => scalar_text(scalar).unwrap_or_default(),
    }
}
