//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `merge`: Merge sources and print the result
//! - `validate`: Check that a single source parses
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod merge;
pub mod validate;

pub use completions::CompletionsCommand;
pub use merge::MergeCommand;
pub use validate::ValidateCommand;
