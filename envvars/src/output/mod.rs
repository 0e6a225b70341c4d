//! Output formatting for merged variables.
//!
//! This module renders a merged mapping as env-file text, JSON or YAML.
//! Every formatter emits keys in sorted order so output is deterministic.

mod formatters;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::env::VarMap;
use crate::{Error, Result};

pub use formatters::{escape_env_value, EnvFormatter, JsonFormatter, YamlFormatter};

/// Trait for rendering merged variables into an output format.
pub trait OutputFormatter {
    /// Format the given variables into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, vars: &VarMap) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `KEY=value` lines.
    #[default]
    Env,
    /// Pretty-printed JSON object.
    Json,
    /// YAML mapping.
    Yaml,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::env::VarMap;
    /// use envvars::output::{OutputFormat, OutputFormatter};
    ///
    /// let mut vars = VarMap::new();
    /// vars.insert("GREETING".to_string(), "hello world".to_string());
    ///
    /// let text = OutputFormat::Env.create_formatter().format(&vars).unwrap();
    /// assert_eq!(text, "GREETING=\"hello world\"");
    /// ```
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Env => Box::new(EnvFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => write!(f, "env"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "env" | "dotenv" => Ok(Self::Env),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::Validation {
                field: "format".to_string(),
                message: format!("unsupported format: {s} (expected env, json or yaml)"),
            }),
        }
    }
}
