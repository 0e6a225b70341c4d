//! Build script for envvars-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("envvars")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merge environment variables from layered source files")
        .long_about(
            "Merge environment variables from env, JSON, YAML and SOPS files, \
             steered by directive comments inside env files",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this manifest instead of discovering envvars.yaml")
                .value_name("PATH")
                .global(true)
                .env("ENVVARS_CONFIG"),
        )
        .subcommands(vec![
            Command::new("merge")
                .about("Merge sources and print the result")
                .long_about(
                    "Merge the manifest's sources and the given sources in order; later sources win",
                )
                .arg(
                    Arg::new("sources")
                        .value_name("SOURCES")
                        .help("Sources to merge, lowest precedence first ([TYPE:]PATH)")
                        .num_args(0..),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format (env, json, yaml)"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Write the result to a file instead of stdout"),
                )
                .arg(
                    Arg::new("sops-age-key-file")
                        .long("sops-age-key-file")
                        .value_name("PATH")
                        .help("Age identity file passed to sops"),
                ),
            Command::new("validate")
                .about("Check that a single source parses")
                .long_about(
                    "Check one source on its own: directive syntax for env files, \
                     decoding and schema for structured files",
                )
                .arg(Arg::new("source").value_name("SOURCE").required(true))
                .arg(
                    Arg::new("sops-age-key-file")
                        .long("sops-age-key-file")
                        .value_name("PATH")
                        .help("Age identity file passed to sops"),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(Arg::new("shell").value_name("SHELL").required(true)),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("failed to render man page");

    fs::write(man_dir.join("envvars.1"), buffer).expect("failed to write man page");

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
