//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use envvars::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a source entry or the age key file has
    /// an empty path.
    pub fn validate(config: &Config) -> Result<()> {
        for (index, source) in config.sources.iter().flatten().enumerate() {
            if source.path.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: format!("sources[{index}].path"),
                    message: "path cannot be empty".into(),
                });
            }
        }

        if let Some(ref key_file) = config.sops_age_key_file {
            if key_file.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "sops_age_key_file".into(),
                    message: "path cannot be empty".into(),
                });
            }
        }

        Ok(())
    }
}
