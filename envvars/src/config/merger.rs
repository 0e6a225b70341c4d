//! Configuration merging and precedence handling.
//!
//! Scalar fields are last-writer-wins; the `sources` list accumulates so a
//! local manifest can append to the project one.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use envvars::config::{Config, ConfigMerger};
/// use envvars::output::OutputFormat;
///
/// let low = Config { format: Some(OutputFormat::Env), ..Default::default() };
/// let high = Config { format: Some(OutputFormat::Json), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.format, Some(OutputFormat::Json));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - `format`, `sops_age_key_file`: source overwrites if Some
    /// - `sources`: accumulated, target entries first
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.format.is_some() {
            target.format = source.format;
        }

        if source.sops_age_key_file.is_some() {
            target.sops_age_key_file.clone_from(&source.sops_age_key_file);
        }

        if let Some(ref source_list) = source.sources {
            match &mut target.sources {
                Some(target_list) => target_list.extend(source_list.iter().cloned()),
                None => target.sources.clone_from(&source.sources),
            }
        }
    }
}
