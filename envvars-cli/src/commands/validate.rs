//! Command to validate a single source file.
//!
//! Env files are only checked for syntax: directives are parsed but not
//! applied, since a `#require` or `#filter-unless` depends on the sources
//! merged before it. Structured sources are fully decoded (and decrypted).

use crate::error::CliError;
use crate::utils::{load_configuration, parse_sources, source_merger, GlobalOptions};
use clap::Args;
use envvars::env::EnvFile;
use envvars::{Error as LibError, SourceKind};
use std::path::PathBuf;

/// Validate a single source file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Source to validate ([TYPE:]PATH)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Age identity file passed to sops
    #[arg(long, value_name = "PATH")]
    pub sops_age_key_file: Option<PathBuf>,
}

/// What a valid source contains.
struct Summary {
    variables: usize,
    directives: Option<usize>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Parse the argument
        let mut sources = parse_sources(std::slice::from_ref(&self.source))?;
        let Some(source) = sources.pop() else {
            return Err(CliError::InvalidArguments("no source specified".to_string()));
        };

        // 2. Check file exists
        if !source.path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                source.path.display()
            )));
        }

        // 3. Check it on its own
        let checked = match source.kind {
            SourceKind::Env => EnvFile::parse(&source.path).map(|file| Summary {
                variables: file.variables.len(),
                directives: Some(file.directives.len()),
            }),
            _ => {
                let config = load_configuration(global)?;
                source_merger(self.sops_age_key_file, &config)
                    .load(&source)
                    .map(|vars| Summary {
                        variables: vars.len(),
                        directives: None,
                    })
            }
        };

        match checked {
            Ok(summary) => {
                println!("Source is valid");
                if !global.quiet {
                    println!("  type: {}", source.kind);
                    println!("  variables: {}", summary.variables);
                    if let Some(directives) = summary.directives {
                        println!("  directives: {directives}");
                    }
                }
                Ok(())
            }
            Err(e @ (LibError::FileAccess { .. } | LibError::Io(_))) => Err(e.into()),
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(format!(
                    "Source '{}' is invalid",
                    source.path.display()
                )))
            }
        }
    }
}
