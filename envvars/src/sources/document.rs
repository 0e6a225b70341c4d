//! Shared handling for decoded JSON and YAML documents.

use std::path::Path;

use serde_json::{Map, Value};

use super::schema::{self, SCHEMA_KEY};
use crate::env::{is_valid_key, VarMap};
use crate::error::{Error, Result};

/// Converts a decoded document into variables.
///
/// The top level must be an object. If it names a `$schema` the document is
/// validated first. The `$schema` key itself and keys that are not valid
/// identifiers are skipped.
pub(crate) fn document_to_vars(document: &Value, path: &Path) -> Result<VarMap> {
    let Value::Object(object) = document else {
        return Err(Error::InvalidDocument {
            path: path.to_path_buf(),
            reason: format!("top level must be a mapping, found {}", kind_of(document)),
        });
    };

    schema::check(document, path)?;
    Ok(object_to_vars(object, path))
}

fn object_to_vars(object: &Map<String, Value>, path: &Path) -> VarMap {
    object
        .iter()
        .filter(|(key, _)| key.as_str() != SCHEMA_KEY)
        .filter(|(key, _)| {
            let valid = is_valid_key(key);
            if !valid {
                log::debug!("skipping invalid key {key:?} in {}", path.display());
            }
            valid
        })
        .map(|(key, value)| (key.clone(), stringify(value)))
        .collect()
}

/// Renders a JSON value as an environment variable value.
///
/// Strings are taken verbatim, numbers and booleans use their display form,
/// null becomes the empty string and containers become compact JSON.
///
/// JSON and YAML documents are flat key/value layers, so a container value is
/// one opaque variable and compact JSON keeps it parseable by the consumer.
/// SOPS documents are instead flattened into one variable per leaf, and their
/// sequences are comma-joined (see [`crate::sources::flatten`]), so the same
/// list renders differently depending on the source kind.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
