//! Configuration schema definitions.
//!
//! An `envvars.yaml` manifest names the sources to merge and the default
//! output format, so a project can run `envvars merge` without arguments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::sources::{Source, SourceKind};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use envvars::config::{Config, SourceConfig};
/// use envvars::output::OutputFormat;
///
/// let config: Config = serde_yaml::from_str(
///     "format: json\nsources:\n  - path: base.env\n  - path: secrets.bin\n    type: sops\n",
/// )
/// .unwrap();
///
/// assert_eq!(config.format, Some(OutputFormat::Json));
/// assert_eq!(config.sources.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default output format for `merge`.
    pub format: Option<OutputFormat>,

    /// Sources to merge, lowest precedence first.
    pub sources: Option<Vec<SourceConfig>>,

    /// Age identity file handed to `sops` when decrypting.
    pub sops_age_key_file: Option<PathBuf>,
}

impl Config {
    /// The configured sources as [`Source`] values, in merge order.
    #[must_use]
    pub fn source_list(&self) -> Vec<Source> {
        self.sources
            .iter()
            .flatten()
            .map(SourceConfig::to_source)
            .collect()
    }

    /// Resolves relative paths in this configuration against `base`.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if let Some(sources) = &mut self.sources {
            for source in sources.iter_mut() {
                if source.path.is_relative() && !source.path.as_os_str().is_empty() {
                    source.path = base.join(&source.path);
                }
            }
        }
        if let Some(key_file) = self.sops_age_key_file.take() {
            self.sops_age_key_file = Some(if key_file.is_relative() && !key_file.as_os_str().is_empty() {
                base.join(key_file)
            } else {
                key_file
            });
        }
        self
    }
}

/// One entry of the `sources` list.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// File to read; relative paths are resolved against the manifest.
    pub path: PathBuf,

    /// Source type; inferred from the file name when omitted.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceKind>,
}

impl SourceConfig {
    /// Converts this entry into a [`Source`].
    #[must_use]
    pub fn to_source(&self) -> Source {
        match self.kind {
            Some(kind) => Source::new(&self.path, kind),
            None => Source::from_path(&self.path),
        }
    }
}
