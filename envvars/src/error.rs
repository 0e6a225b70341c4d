//! Error types for the envvars library.
//!
//! This module provides the error hierarchy for parsing, merging and
//! formatting environment variables, using `thiserror` for ergonomic error
//! handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an envvars error.
///
/// # Examples
///
/// ```
/// use envvars::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("value".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the envvars library.
///
/// Every variant aborts the merge of the file being processed; nothing is
/// retried or recovered locally.
#[derive(Debug, Error)]
pub enum Error {
    /// A source file could not be opened or read.
    #[error("failed to open file '{}': {source}", path.display())]
    FileAccess {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directive comment in an env file was malformed.
    #[error("invalid directive in '{}': {source}", path.display())]
    Directive {
        /// The env file containing the directive.
        path: PathBuf,
        /// The directive parse failure.
        #[source]
        source: DirectiveError,
    },

    /// A `#require` directive named a key absent from the merged result.
    #[error("required environment variable '{key}' not found")]
    MissingRequired {
        /// The key exactly as written in the directive.
        key: String,
    },

    /// A JSON source could not be decoded.
    #[error("failed to parse JSON file '{}': {source}", path.display())]
    Json {
        /// The JSON file.
        path: PathBuf,
        /// The decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A YAML source could not be decoded.
    #[error("failed to parse YAML file '{}': {source}", path.display())]
    Yaml {
        /// The YAML file.
        path: PathBuf,
        /// The decoder error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A structured source decoded but is not a key/value document.
    #[error("invalid document '{}': {reason}", path.display())]
    InvalidDocument {
        /// The offending file.
        path: PathBuf,
        /// Why the document was rejected.
        reason: String,
    },

    /// A source failed validation against the schema named by its `$schema` key.
    #[error("JSON schema validation failed for '{}': {message}", path.display())]
    SchemaValidation {
        /// The source file being validated.
        path: PathBuf,
        /// Description of the validation failure.
        message: String,
    },

    /// A SOPS source could not be decrypted.
    #[error("failed to decrypt SOPS file '{}': {message}", path.display())]
    Decryption {
        /// The encrypted file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// An unknown source type was requested.
    #[error("unsupported source type: {value}")]
    UnsupportedSourceType {
        /// The type name as given.
        value: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration manifest could not be parsed.
    #[error("invalid configuration '{}': {message}", path.display())]
    Configuration {
        /// The manifest file.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to parse a single directive comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// The comment held nothing after the leading `#`.
    #[error("empty directive at line {line}")]
    Empty {
        /// 1-based line number of the directive.
        line: usize,
    },
}

impl Error {
    /// Check if error was caused by a missing required variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::Error;
    ///
    /// let err = Error::MissingRequired { key: "API_KEY".to_string() };
    /// assert!(err.is_missing_required());
    /// ```
    #[must_use]
    pub fn is_missing_required(&self) -> bool {
        matches!(self, Self::MissingRequired { .. })
    }

    /// Check if error indicates a source file could not be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::FileAccess {
    ///     path: PathBuf::from("missing.env"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    /// };
    /// assert!(err.is_file_access());
    /// ```
    #[must_use]
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message_is_exact() {
        let err = Error::MissingRequired {
            key: "existing_key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "required environment variable 'existing_key' not found"
        );
    }

    #[test]
    fn test_file_access_error() {
        let err = Error::FileAccess {
            path: PathBuf::from("/missing/app.env"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let display = format!("{err}");
        assert!(display.contains("failed to open file"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/missing/app.env"));
        assert!(err.is_file_access());
    }

    #[test]
    fn test_directive_error() {
        let err = Error::Directive {
            path: PathBuf::from("app.env"),
            source: DirectiveError::Empty { line: 3 },
        };
        let display = format!("{err}");
        assert!(display.contains("invalid directive"));
        assert!(display.contains("app.env"));
        assert!(display.contains("empty directive at line 3"));
    }

    #[test]
    fn test_schema_validation_error() {
        let err = Error::SchemaValidation {
            path: PathBuf::from("config.json"),
            message: "\"PORT\" is a required property".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("schema validation failed"));
        assert!(display.contains("PORT"));
    }

    #[test]
    fn test_unsupported_source_type_error() {
        let err = Error::UnsupportedSourceType {
            value: "toml".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported source type: toml");
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "sources".to_string(),
            message: "no sources specified".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("sources"));
        assert!(display.contains("no sources specified"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
        assert!(!err.is_missing_required());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Err(Error::MissingRequired {
                key: "KEY".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
