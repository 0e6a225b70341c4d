#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # envvars
//!
//! A library for merging environment variables from layered source files.
//!
//! Env files are merged in order, each one steering the merge with directive
//! comments (`#remove`, `#require`, `#filter`, `#filter-unless`). JSON, YAML
//! and SOPS-encrypted files can be mixed in as plain key/value layers.
//!
//! ## Core Types
//!
//! - [`env::EnvFile`] and [`env::merge_file`]: the directive-aware env engine
//! - [`Source`] and [`SourceMerger`]: multi-source merging
//! - [`OutputFormat`]: env, JSON and YAML rendering
//! - [`Config`] and [`ConfigBuilder`]: `envvars.yaml` manifests
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use envvars::env::{merge_env_file, EnvFile, VarMap};
//! use std::path::Path;
//!
//! let mut existing = VarMap::new();
//! existing.insert("LEGACY".to_string(), "1".to_string());
//!
//! let file = EnvFile::parse_str(
//!     "#remove legacy\nBASE_URL=https://api.example.com\nFULL_URL=${BASE_URL}/v1",
//!     Path::new(".env"),
//! )
//! .unwrap();
//!
//! let merged = merge_env_file(&existing, &file).unwrap();
//! assert_eq!(merged["FULL_URL"], "https://api.example.com/v1");
//! assert!(!merged.contains_key("LEGACY"));
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod output;
pub mod sources;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use env::{merge_file, VarMap};
pub use error::{DirectiveError, Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormat, OutputFormatter};
pub use sources::{Source, SourceKind, SourceMerger};
