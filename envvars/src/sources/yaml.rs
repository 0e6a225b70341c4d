//! YAML sources.

use std::fs;
use std::path::Path;

use super::document::document_to_vars;
use super::SourceProcessor;
use crate::env::VarMap;
use crate::error::{Error, Result};

/// Loads top-level keys of a YAML mapping as variables.
///
/// Values follow the same rendering as [`super::JsonProcessor`], so
/// `port: 8080` and `"port": 8080` produce the same variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlProcessor;

impl SourceProcessor for YamlProcessor {
    fn load(&self, path: &Path) -> Result<VarMap> {
        let contents = fs::read_to_string(path).map_err(|e| Error::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|e| Error::Yaml {
                path: path.to_path_buf(),
                source: e,
            })?;

        if document.is_null() {
            return Err(Error::InvalidDocument {
                path: path.to_path_buf(),
                reason: "document is empty".to_string(),
            });
        }

        let document = serde_json::to_value(&document).map_err(|e| Error::InvalidDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        document_to_vars(&document, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.yaml",
            "HOST: localhost\nPORT: 5432\nENABLED: true\nRATIO: 0.5\nNOTHING: ~\n",
        );

        let vars = YamlProcessor.load(&path).unwrap();
        assert_eq!(vars["HOST"], "localhost");
        assert_eq!(vars["PORT"], "5432");
        assert_eq!(vars["ENABLED"], "true");
        assert_eq!(vars["RATIO"], "0.5");
        assert_eq!(vars["NOTHING"], "");
    }

    #[test]
    fn test_sequence_value_becomes_json_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "HOSTS:\n  - a\n  - b\n");

        let vars = YamlProcessor.load(&path).unwrap();
        assert_eq!(vars["HOSTS"], r#"["a","b"]"#);
    }

    #[test]
    fn test_invalid_keys_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "good_key: 1\nbad-key: 2\n");

        let vars = YamlProcessor.load(&path).unwrap();
        assert_eq!(vars.len(), 1);
        assert!(vars.contains_key("good_key"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "# nothing here\n");

        let err = YamlProcessor.load(&path).unwrap_err();
        assert!(err.to_string().contains("document is empty"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "just a string\n");

        let err = YamlProcessor.load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.yaml", "key: [unclosed\n");

        let err = YamlProcessor.load(&path).unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
    }

    #[test]
    fn test_yaml_schema_check() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "schema.yaml",
            "type: object\nproperties:\n  PORT:\n    type: integer\n",
        );
        let ok = write(&dir, "ok.yaml", "$schema: schema.yaml\nPORT: 80\n");
        let bad = write(&dir, "bad.yaml", "$schema: schema.yaml\nPORT: eighty\n");

        let vars = YamlProcessor.load(&ok).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["PORT"], "80");

        assert!(matches!(
            YamlProcessor.load(&bad).unwrap_err(),
            Error::SchemaValidation { .. }
        ));
    }
}
