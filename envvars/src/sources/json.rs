//! JSON sources.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::document::document_to_vars;
use super::SourceProcessor;
use crate::env::VarMap;
use crate::error::{Error, Result};

/// Loads top-level keys of a JSON object as variables.
///
/// # Examples
///
/// ```no_run
/// use envvars::sources::{JsonProcessor, SourceProcessor};
/// use std::path::Path;
///
/// let vars = JsonProcessor.load(Path::new("config.json")).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProcessor;

impl SourceProcessor for JsonProcessor {
    fn load(&self, path: &Path) -> Result<VarMap> {
        let contents = fs::read_to_string(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document: Value = serde_json::from_str(&contents).map_err(|e| Error::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

        document_to_vars(&document, path)
    }
}
