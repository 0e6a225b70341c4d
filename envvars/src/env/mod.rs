//! The directive-aware env file engine.
//!
//! Env files are `KEY=VALUE` text with `${NAME}` references and directive
//! comments that steer how the file merges into what came before:
//!
//! ```text
//! #require DATABASE_URL
//! #remove LEGACY_HOST
//! #filter DEBUG_*
//! #filter-unless APP_* DATABASE_*
//! APP_HOST=localhost
//! DATABASE_URL="postgres://${APP_HOST}/app"
//! ```
//!
//! [`merge_file`] runs the stages in a fixed order:
//!
//! 1. `remove` against the carried-forward mapping
//! 2. overlay of the file's own variables
//! 3. `filter`
//! 4. `filter-unless`
//! 5. `require`
//!
//! # Examples
//!
//! ```
//! use envvars::env::{merge_env_file, EnvFile, VarMap};
//! use std::path::Path;
//!
//! let file = EnvFile::parse_str(
//!     "#filter-unless APP_*\nAPP_NAME=demo\nOTHER=x",
//!     Path::new("app.env"),
//! )
//! .unwrap();
//!
//! let merged = merge_env_file(&VarMap::new(), &file).unwrap();
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged["APP_NAME"], "demo");
//! ```

use std::collections::HashMap;

pub mod directive;
pub mod merge;
pub mod parser;
pub mod pattern;
pub mod pipeline;
pub mod scanner;
pub mod value;

#[cfg(test)]
mod proptests;

/// The working key/value state threaded through a merge.
pub type VarMap = HashMap<String, String>;

pub use directive::{parse_directive, Directive, DirectiveKind};
pub use merge::{merge_env_file, merge_file};
pub use parser::{is_valid_key, EnvFile, Variable};
pub use pattern::{matches_pattern, KeyPattern};
pub use pipeline::{apply_filter, apply_filter_unless, apply_remove, apply_require};
pub use scanner::{classify, Line};
pub use value::{resolve_references, unquote};
