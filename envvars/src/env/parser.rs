//! Env file parsing.
//!
//! A file is read into memory once and scanned in two logical passes. The
//! first pass collects directives and builds the reference table from every
//! assignment; the second pass emits a [`Variable`] for each assignment whose
//! key is a valid identifier, with `${NAME}` references resolved against that
//! table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::directive::{parse_directive, Directive};
use super::scanner::{classify, Line};
use super::value::{resolve_references, unquote};
use crate::error::{Error, Result};

static VALID_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("key pattern is valid"));

/// Returns true if `key` may be emitted as an environment variable name.
///
/// # Examples
///
/// ```
/// use envvars::env::is_valid_key;
///
/// assert!(is_valid_key("DATABASE_URL"));
/// assert!(is_valid_key("_private"));
/// assert!(!is_valid_key("1ST"));
/// assert!(!is_valid_key("my-key"));
/// assert!(!is_valid_key(""));
/// ```
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    VALID_KEY.is_match(key)
}

/// A single variable emitted from an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Variable name; always satisfies [`is_valid_key`].
    pub key: String,
    /// Unquoted, reference-resolved value.
    pub value: String,
    /// The file the variable was read from.
    pub source_file: PathBuf,
}

/// The parse result of one env file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFile {
    /// The file that was parsed.
    pub path: PathBuf,
    /// Variables in file order. Later duplicates follow earlier ones.
    pub variables: Vec<Variable>,
    /// Directives in file order.
    pub directives: Vec<Directive>,
}

impl EnvFile {
    /// Reads and parses an env file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the file cannot be read, or
    /// [`Error::Directive`] if any directive comment is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use envvars::env::EnvFile;
    /// use std::path::Path;
    ///
    /// let file = EnvFile::parse(Path::new(".env")).unwrap();
    /// for variable in &file.variables {
    ///     println!("{}={}", variable.key, variable.value);
    /// }
    /// ```
    pub fn parse(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        // Invalid UTF-8 sequences become U+FFFD rather than failing the file.
        Self::parse_str(&String::from_utf8_lossy(&bytes), path)
    }

    /// Parses env file content that is already in memory.
    ///
    /// `path` is recorded on the result and on every variable, and used for
    /// error context; it is never opened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directive`] if any directive comment is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::env::EnvFile;
    /// use std::path::Path;
    ///
    /// let content = "BASE=https://example.com\nURL=${BASE}/v1\n#require URL\n";
    /// let file = EnvFile::parse_str(content, Path::new("inline.env")).unwrap();
    ///
    /// assert_eq!(file.variables[1].value, "https://example.com/v1");
    /// assert_eq!(file.directives[0].arguments, vec!["URL"]);
    /// ```
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let lines: Vec<&str> = content.lines().collect();

        // Pass 1: directives and the reference table
        let mut directives = Vec::new();
        let mut table = HashMap::new();

        for (index, raw) in lines.iter().enumerate() {
            match classify(raw) {
                Line::Directive(text) => {
                    let directive =
                        parse_directive(text, index + 1).map_err(|source| Error::Directive {
                            path: path.to_path_buf(),
                            source,
                        })?;
                    directives.push(directive);
                }
                Line::Assignment { key, raw_value } => {
                    table.insert(key.to_string(), unquote(raw_value));
                }
                Line::Blank | Line::Comment | Line::Other => {}
            }
        }

        // Pass 2: emit valid variables with references resolved
        let variables: Vec<Variable> = lines
            .iter()
            .filter_map(|raw| match classify(raw) {
                Line::Assignment { key, raw_value } if is_valid_key(key) => Some(Variable {
                    key: key.to_string(),
                    value: resolve_references(&unquote(raw_value), &table),
                    source_file: path.to_path_buf(),
                }),
                _ => None,
            })
            .collect();

        log::debug!(
            "parsed {}: {} variable(s), {} directive(s)",
            path.display(),
            variables.len(),
            directives.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            variables,
            directives,
        })
    }

    /// Returns the variables as a map, later duplicates winning.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|v| (v.key.clone(), v.value.clone()))
            .collect()
    }
}
