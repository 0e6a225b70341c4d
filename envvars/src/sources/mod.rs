//! Source files and multi-source merging.
//!
//! A [`Source`] is a path plus the [`SourceKind`] that decides how it is read.
//! [`SourceMerger`] folds a list of sources into one mapping, strictly in the
//! order given; later sources win. Only env sources run the directive
//! pipeline, the structured kinds simply overlay their keys.

mod document;
mod json;
pub mod schema;
mod sops;
mod yaml;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::env::{merge_file, VarMap};
use crate::error::{Error, Result};

pub use json::JsonProcessor;
pub use sops::{flatten, Decryptor, SopsCli, SopsProcessor, AGE_KEY_FILE_ENV};
pub use yaml::YamlProcessor;

/// Reads one kind of source file into variables.
pub trait SourceProcessor {
    /// Loads the variables defined by the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, decoded or validated.
    fn load(&self, path: &Path) -> Result<VarMap>;

    /// Merges the file at `path` over `existing`.
    ///
    /// The default overlays the loaded variables, so the file's values win.
    ///
    /// # Errors
    ///
    /// Returns any error from [`SourceProcessor::load`].
    fn merge(&self, existing: &VarMap, path: &Path) -> Result<VarMap> {
        let mut merged = existing.clone();
        merged.extend(self.load(path)?);
        Ok(merged)
    }
}

/// Directive-aware env files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProcessor;

impl SourceProcessor for EnvProcessor {
    fn load(&self, path: &Path) -> Result<VarMap> {
        merge_file(&VarMap::new(), path)
    }

    fn merge(&self, existing: &VarMap, path: &Path) -> Result<VarMap> {
        merge_file(existing, path)
    }
}

/// The format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `KEY=VALUE` env file with directives.
    Env,
    /// JSON object.
    Json,
    /// YAML mapping.
    Yaml,
    /// SOPS-encrypted YAML.
    Sops,
}

impl SourceKind {
    /// All kinds, in the order they are listed in help text.
    pub const ALL: [Self; 4] = [Self::Env, Self::Json, Self::Yaml, Self::Sops];

    /// Infers the kind from a file name.
    ///
    /// `.enc.yaml` and `.sops.yaml` (or `.yml`) are SOPS files, other
    /// `.yaml`/`.yml` files are YAML, `.json` is JSON and everything else is
    /// treated as an env file.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::sources::SourceKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(SourceKind::infer(Path::new("app.json")), SourceKind::Json);
    /// assert_eq!(SourceKind::infer(Path::new("app.yml")), SourceKind::Yaml);
    /// assert_eq!(SourceKind::infer(Path::new("secrets.enc.yaml")), SourceKind::Sops);
    /// assert_eq!(SourceKind::infer(Path::new(".env.local")), SourceKind::Env);
    /// ```
    #[must_use]
    pub fn infer(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if [".enc.yaml", ".enc.yml", ".sops.yaml", ".sops.yml"]
            .iter()
            .any(|suffix| name.ends_with(suffix))
        {
            Self::Sops
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Self::Yaml
        } else if name.ends_with(".json") {
            Self::Json
        } else {
            Self::Env
        }
    }

    /// The lowercase name used in `type:` prefixes and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Sops => "sops",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedSourceType {
                value: s.to_string(),
            })
    }
}

/// One input file and how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Location of the file.
    pub path: PathBuf,
    /// How the file is read.
    pub kind: SourceKind,
}

impl Source {
    /// Creates a source with an explicit kind.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Creates a source whose kind is inferred from the file name.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = SourceKind::infer(&path);
        Self { path, kind }
    }

    /// Parses a command-line source argument.
    ///
    /// The argument is either a bare path, whose kind is inferred, or
    /// `TYPE:PATH` with `TYPE` one of `env`, `json`, `yaml` or `sops`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSourceType`] for an unknown `TYPE:` prefix
    /// and [`Error::Validation`] for an empty path.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::sources::{Source, SourceKind};
    ///
    /// let source = Source::parse("yaml:settings.conf").unwrap();
    /// assert_eq!(source.kind, SourceKind::Yaml);
    ///
    /// let source = Source::parse("config/app.json").unwrap();
    /// assert_eq!(source.kind, SourceKind::Json);
    ///
    /// assert!(Source::parse("toml:app.toml").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let source = match spec.split_once(':') {
            Some((prefix, path)) if looks_like_type(prefix) => {
                Self::new(path, prefix.parse::<SourceKind>()?)
            }
            _ => Self::from_path(spec),
        };

        if source.path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: "source".to_string(),
                message: format!("no path given in '{spec}'"),
            });
        }

        Ok(source)
    }

    /// Resolves a relative path against `base`.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
        self
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path.display())
    }
}

// Single letters are left alone so drive prefixes like `C:` stay paths
fn looks_like_type(prefix: &str) -> bool {
    prefix.len() > 1 && prefix.chars().all(|c| c.is_ascii_alphabetic())
}

/// Merges sources in order into a single mapping.
///
/// # Examples
///
/// ```no_run
/// use envvars::sources::{Source, SourceMerger};
///
/// let merger = SourceMerger::new();
/// let vars = merger
///     .merge(&[
///         Source::from_path(".env"),
///         Source::from_path("config.json"),
///         Source::from_path(".env.local"),
///     ])
///     .unwrap();
/// ```
pub struct SourceMerger {
    decryptor: Box<dyn Decryptor>,
}

impl SourceMerger {
    /// Creates a merger that decrypts SOPS files with the `sops` binary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_decryptor(SopsCli::new())
    }

    /// Creates a merger with a custom decryptor.
    #[must_use]
    pub fn with_decryptor(decryptor: impl Decryptor + 'static) -> Self {
        Self {
            decryptor: Box::new(decryptor),
        }
    }

    /// Returns the processor for `kind`.
    #[must_use]
    pub fn processor(&self, kind: SourceKind) -> Box<dyn SourceProcessor + '_> {
        match kind {
            SourceKind::Env => Box::new(EnvProcessor),
            SourceKind::Json => Box::new(JsonProcessor),
            SourceKind::Yaml => Box::new(YamlProcessor),
            SourceKind::Sops => Box::new(SopsProcessor::new(self.decryptor.as_ref())),
        }
    }

    /// Loads a single source on its own.
    ///
    /// # Errors
    ///
    /// Returns any error from the source's processor.
    pub fn load(&self, source: &Source) -> Result<VarMap> {
        self.processor(source.kind).load(&source.path)
    }

    /// Merges `sources` left to right, starting from an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `sources` is empty, otherwise the
    /// first error from any source. No partial result is returned.
    pub fn merge(&self, sources: &[Source]) -> Result<VarMap> {
        if sources.is_empty() {
            return Err(Error::Validation {
                field: "sources".to_string(),
                message: "at least one source is required".to_string(),
            });
        }

        sources.iter().try_fold(VarMap::new(), |merged, source| {
            log::info!("merging {source}");
            self.processor(source.kind).merge(&merged, &source.path)
        })
    }
}

impl Default for SourceMerger {
    fn default() -> Self {
        Self::new()
    }
}
