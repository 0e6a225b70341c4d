//! Merge command implementation.
//!
//! Folds the manifest's sources and the command-line sources, in that order,
//! into one mapping and renders it.

use crate::error::CliError;
use crate::utils::{
    load_configuration, parse_sources, source_merger, write_output, GlobalOptions,
};
use clap::Args;
use envvars::{OutputFormat, OutputFormatter};
use std::path::PathBuf;

/// Merge environment variables from one or more sources.
#[derive(Args)]
#[command(after_help = "Sources listed in envvars.yaml / envvars.local.yaml are merged before \
the SOURCES given here. The manifests are found by searching the current directory and \
every parent directory; pass --config to name one explicitly, or --verbose to see which \
manifest was loaded.")]
pub struct MergeCommand {
    /// Sources to merge, lowest precedence first ([TYPE:]PATH)
    #[arg(value_name = "SOURCES")]
    pub sources: Vec<String>,

    /// Output format (env, json, yaml)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Age identity file passed to sops
    #[arg(long, value_name = "PATH")]
    pub sops_age_key_file: Option<PathBuf>,
}

impl MergeCommand {
    /// Execute the merge command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;

        // 2. Collect sources: manifest first, then command line
        let mut sources = config.source_list();
        sources.extend(parse_sources(&self.sources)?);
        if sources.is_empty() {
            return Err(CliError::InvalidArguments(
                "no sources specified".to_string(),
            ));
        }

        // 3. Resolve output format
        let format = match self.format {
            Some(ref name) => name
                .parse::<OutputFormat>()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            None => config.format.unwrap_or_default(),
        };

        // 4. Merge
        let merger = source_merger(self.sops_age_key_file, &config);

        if global.verbose {
            eprintln!("Processing {} sources...", sources.len());
        }
        let merged = merger.merge(&sources)?;
        if global.verbose {
            eprintln!("Merged {} variables", merged.len());
        }

        // 5. Render
        let text = format.create_formatter().format(&merged)?;
        write_output(&text, self.output.as_deref())
    }
}
