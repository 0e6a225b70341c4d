//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, source argument parsing and output
//! writing.

use crate::error::CliError;
use envvars::sources::SopsCli;
use envvars::{Config, ConfigBuilder, Source, SourceMerger};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit manifest path; disables discovery.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `envvars.local.yaml`
/// 3. `envvars.yaml` (or the file given with `--config`)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Parse `[TYPE:]PATH` arguments into sources.
pub fn parse_sources(specs: &[String]) -> Result<Vec<Source>, CliError> {
    specs
        .iter()
        .map(|spec| {
            Source::parse(spec).map_err(|e| CliError::InvalidArguments(format!("{spec}: {e}")))
        })
        .collect()
}

/// Build a merger whose `sops` decryptor uses the age key from the command
/// line, falling back to the configured one.
pub fn source_merger(age_key_file: Option<PathBuf>, config: &Config) -> SourceMerger {
    let mut decryptor = SopsCli::new();
    if let Some(key_file) = age_key_file.or_else(|| config.sops_age_key_file.clone()) {
        decryptor = decryptor.with_age_key_file(key_file);
    }
    SourceMerger::with_decryptor(decryptor)
}

/// Write rendered output to `path`, or to stdout when no path is given.
///
/// A trailing newline is added to non-empty output.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<(), CliError> {
    let mut rendered = text.to_string();
    if !rendered.is_empty() {
        rendered.push('\n');
    }

    match path {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envvars::SourceKind;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sources() {
        let sources =
            parse_sources(&["a.env".to_string(), "yaml:b.txt".to_string()]).unwrap();
        assert_eq!(sources[0].kind, SourceKind::Env);
        assert_eq!(sources[1].kind, SourceKind::Yaml);
        assert_eq!(sources[1].path, PathBuf::from("b.txt"));
    }

    #[test]
    fn test_parse_sources_unknown_type() {
        let err = parse_sources(&["toml:b.toml".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("unsupported source type"));
    }

    #[test]
    fn test_write_output_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.env");

        write_output("A=1", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\n");

        write_output("", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_load_configuration_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let global = GlobalOptions {
            config: Some(temp.path().join("missing.yaml")),
            ..Default::default()
        };
        let err = load_configuration(&global).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }
}
