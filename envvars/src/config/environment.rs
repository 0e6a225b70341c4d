//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `ENVVARS_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use std::env;
use std::path::PathBuf;

/// Overrides the output format.
pub const FORMAT_ENV: &str = "ENVVARS_FORMAT";

/// Overrides the age identity file used for SOPS sources.
pub const SOPS_AGE_KEY_FILE_ENV: &str = "ENVVARS_SOPS_AGE_KEY_FILE";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use envvars::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `ENVVARS_FORMAT` names an unknown format.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(format) = Self::non_empty(FORMAT_ENV) {
            config.format = Some(Self::parse_format(&format)?);
        }

        if let Some(key_file) = Self::non_empty(SOPS_AGE_KEY_FILE_ENV) {
            config.sops_age_key_file = Some(PathBuf::from(key_file));
        }

        Ok(())
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    fn parse_format(value: &str) -> Result<OutputFormat> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: FORMAT_ENV.into(),
            message: format!("Invalid format: '{value}' (expected env/json/yaml)"),
        })
    }
}
