//! `$schema` pre-check for structured sources.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::error::{Error, Result};

/// The key that names a schema inside a JSON or YAML source.
pub const SCHEMA_KEY: &str = "$schema";

/// Validates `document` against the schema named by its `$schema` key, if any.
///
/// Remote references (`http://`, `https://`) are handed to the validator's
/// retriever. Anything else is a path relative to `source`'s directory and
/// may be written in JSON or YAML.
///
/// # Errors
///
/// Returns [`Error::SchemaValidation`] if the schema cannot be loaded or
/// compiled, or if the document does not conform to it.
pub fn check(document: &Value, source: &Path) -> Result<()> {
    let Some(reference) = document.get(SCHEMA_KEY) else {
        return Ok(());
    };

    let reference = reference.as_str().ok_or_else(|| Error::SchemaValidation {
        path: source.to_path_buf(),
        message: format!("{SCHEMA_KEY} must be a string"),
    })?;

    let schema = if is_remote(reference) {
        json!({ "$ref": reference })
    } else {
        load_local_schema(&resolve_local(reference, source), source)?
    };

    let validator = jsonschema::validator_for(&schema).map_err(|e| Error::SchemaValidation {
        path: source.to_path_buf(),
        message: format!("failed to compile schema '{reference}': {e}"),
    })?;

    let failures: Vec<String> = validator
        .iter_errors(document)
        .map(|e| {
            let location = e.instance_path.to_string();
            if location.is_empty() {
                e.to_string()
            } else {
                format!("{location}: {e}")
            }
        })
        .collect();

    if failures.is_empty() {
        log::debug!("{} conforms to {reference}", source.display());
        Ok(())
    } else {
        Err(Error::SchemaValidation {
            path: source.to_path_buf(),
            message: failures.join("; "),
        })
    }
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Resolves a local schema reference against the source's directory.
fn resolve_local(reference: &str, source: &Path) -> PathBuf {
    let reference = reference.strip_prefix("file://").unwrap_or(reference);
    let reference = Path::new(reference);
    if reference.is_absolute() {
        return reference.to_path_buf();
    }
    source
        .parent()
        .map_or_else(|| reference.to_path_buf(), |dir| dir.join(reference))
}

fn load_local_schema(schema_path: &Path, source: &Path) -> Result<Value> {
    let failure = |message: String| Error::SchemaValidation {
        path: source.to_path_buf(),
        message,
    };

    let contents = fs::read_to_string(schema_path)
        .map_err(|e| failure(format!("failed to read schema '{}': {e}", schema_path.display())))?;

    // YAML is a superset of JSON, so one decoder covers both
    serde_yaml::from_str(&contents)
        .map_err(|e| failure(format!("failed to parse schema '{}': {e}", schema_path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"{
        "type": "object",
        "required": ["PORT"],
        "properties": { "PORT": { "type": "integer" } }
    }"#;

    #[test]
    fn test_document_without_schema_passes() {
        assert!(check(&json!({ "PORT": "abc" }), Path::new("x.json")).is_ok());
    }

    #[test]
    fn test_local_schema_accepts_conforming_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("schema.json"), SCHEMA).unwrap();
        let source = temp_dir.path().join("config.json");

        let document = json!({ "$schema": "./schema.json", "PORT": 8080 });
        assert!(check(&document, &source).is_ok());
    }

    #[test]
    fn test_local_schema_rejects_nonconforming_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("schema.json"), SCHEMA).unwrap();
        let source = temp_dir.path().join("config.json");

        let document = json!({ "$schema": "schema.json", "PORT": "not a number" });
        let err = check(&document, &source).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
        assert!(err.to_string().contains("/PORT"));
    }

    #[test]
    fn test_yaml_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("schema.yaml"),
            "type: object\nrequired: [NAME]\n",
        )
        .unwrap();
        let source = temp_dir.path().join("config.yaml");

        assert!(check(&json!({ "$schema": "schema.yaml", "NAME": "x" }), &source).is_ok());
        assert!(check(&json!({ "$schema": "schema.yaml" }), &source).is_err());
    }

    #[test]
    fn test_missing_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("config.json");

        let err = check(&json!({ "$schema": "missing.json" }), &source).unwrap_err();
        assert!(err.to_string().contains("failed to read schema"));
    }

    #[test]
    fn test_non_string_schema_reference() {
        let err = check(&json!({ "$schema": 42 }), Path::new("config.json")).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_resolve_local_paths() {
        let source = Path::new("/project/config/app.json");
        assert_eq!(
            resolve_local("schema.json", source),
            PathBuf::from("/project/config/schema.json")
        );
        assert_eq!(
            resolve_local("/abs/schema.json", source),
            PathBuf::from("/abs/schema.json")
        );
        assert!(is_remote("https://example.com/schema.json"));
        assert!(!is_remote("./schema.json"));
    }
}
