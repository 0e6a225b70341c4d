//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading envvars manifests from the
//! project tree with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project manifest file name.
pub const PROJECT_CONFIG: &str = "envvars.yaml";

/// Private, uncommitted manifest file name.
pub const LOCAL_CONFIG: &str = "envvars.local.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration, with paths already resolved against the file.
    pub config: Config,
}

/// Loads configuration from manifest files.
///
/// # Examples
///
/// ```no_run
/// use envvars::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration files", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load every applicable configuration file.
    ///
    /// With an explicit `config_file` only that file is loaded. Otherwise the
    /// tree is searched upwards from `working_dir` (see
    /// [`ConfigLoader::discover_project_configs`]).
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if any
    /// configuration file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, config_file: Option<&Path>) -> Result<Vec<ConfigSource>> {
        if let Some(path) = config_file {
            let config = Self::load_file(path)?;
            return Ok(vec![ConfigSource {
                path: path.to_path_buf(),
                precedence: 1,
                config,
            }]);
        }

        let mut sources = Self::discover_project_configs(working_dir)?;
        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either `envvars.yaml` or
    /// `envvars.local.yaml`. The local file has the higher precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG, 1), (LOCAL_CONFIG, 2)] {
                let candidate = current.join(name);
                if candidate.is_file() {
                    let config = Self::load_file(&candidate)?;
                    log::info!("loaded configuration from {}", candidate.display());
                    configs.push(ConfigSource {
                        path: candidate,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML (or JSON) configuration file.
    ///
    /// Relative paths inside the file are resolved against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&contents).map_err(|e| Error::Configuration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolved_against(base))
    }
}
