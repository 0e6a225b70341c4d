//! Configuration system for envvars.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML (or JSON) manifests (`envvars.yaml` and `envvars.local.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`ENVVARS_*`)
//! 3. Private project config (`envvars.local.yaml`)
//! 4. Project config (`envvars.yaml`)
//!
//! The `sources` lists of every layer are concatenated in that order, lowest
//! first, so later layers' files are merged last and win.
//!
//! An explicit file given with `ConfigBuilder::with_config_file` replaces
//! discovery.
//!
//! # Examples
//!
//! ```no_run
//! use envvars::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! for source in config.source_list() {
//!     println!("{source}");
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, SourceConfig};
pub use validator::ConfigValidator;
