//! Layered configuration construction.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from manifest files, the environment and overrides.
///
/// Layers are applied lowest precedence first: discovered (or explicit)
/// files, then `ENVVARS_*` variables, then [`ConfigBuilder::with_config`].
///
/// # Examples
///
/// ```
/// use envvars::config::{Config, ConfigBuilder};
/// use envvars::output::OutputFormat;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         format: Some(OutputFormat::Yaml),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.format, Some(OutputFormat::Yaml));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that discovers files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts manifest discovery from `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Loads exactly this manifest instead of discovering one.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Ignores manifest files entirely.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `ENVVARS_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other layer.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Loads, merges and validates all layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a manifest cannot be read or parsed, an
    /// environment override is invalid, or the merged result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.config_file.as_deref())?;
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::FORMAT_ENV;
    use crate::config::loader::{LOCAL_CONFIG, PROJECT_CONFIG};
    use crate::output::OutputFormat;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_from_discovered_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG),
            "format: json\nsources:\n  - path: base.env\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG),
            "sources:\n  - path: local.env\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.format, Some(OutputFormat::Json));
        let paths: Vec<_> = config.source_list().into_iter().map(|s| s.path).collect();
        assert_eq!(
            paths,
            vec![
                temp_dir.path().join("base.env"),
                temp_dir.path().join("local.env")
            ]
        );
    }

    #[test]
    fn test_overrides_win() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG), "format: json\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .skip_env()
            .with_config(Config {
                format: Some(OutputFormat::Env),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.format, Some(OutputFormat::Env));
    }

    #[test]
    #[serial]
    fn test_env_beats_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG), "format: json\n").unwrap();

        let saved = env::var(FORMAT_ENV).ok();
        env::set_var(FORMAT_ENV, "yaml");
        let result = ConfigBuilder::new().with_working_dir(temp_dir.path()).build();
        match saved {
            Some(v) => env::set_var(FORMAT_ENV, v),
            None => env::remove_var(FORMAT_ENV),
        }

        assert_eq!(result.unwrap().format, Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_invalid_manifest_fails_build() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG), "unknown_field: 1\n").unwrap();

        let result = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .skip_env()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ci.yaml");
        fs::write(&path, "format: yaml\n").unwrap();

        let config = ConfigBuilder::new()
            .with_config_file(&path)
            .skip_env()
            .build()
            .unwrap();
        assert_eq!(config.format, Some(OutputFormat::Yaml));
    }
}
