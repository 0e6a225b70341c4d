//! Output formatter implementations.

use std::collections::BTreeMap;

use crate::env::VarMap;
use crate::{Error, Result};

use super::OutputFormatter;

/// Characters that force a value into double quotes.
const NEEDS_QUOTES: &[char] = &[' ', '\t', '\n', '\r', '"', '\'', '\\', '$', '`'];

fn sorted(vars: &VarMap) -> BTreeMap<&str, &str> {
    vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Quotes a value for env-file output when it contains whitespace, quotes,
/// backslashes, `$` or backticks.
///
/// Inside the quotes `\` and `"` are backslash-escaped. Empty values stay
/// empty.
///
/// # Examples
///
/// ```
/// use envvars::output::escape_env_value;
///
/// assert_eq!(escape_env_value("plain"), "plain");
/// assert_eq!(escape_env_value(""), "");
/// assert_eq!(escape_env_value("two words"), "\"two words\"");
/// assert_eq!(escape_env_value(r#"say "hi""#), r#""say \"hi\"""#);
/// assert_eq!(escape_env_value("$HOME"), "\"$HOME\"");
/// ```
#[must_use]
pub fn escape_env_value(value: &str) -> String {
    if !value.contains(NEEDS_QUOTES) {
        return value.to_string();
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Formatter for env-file (`KEY=value`) output.
pub struct EnvFormatter;

impl OutputFormatter for EnvFormatter {
    fn format(&self, vars: &VarMap) -> Result<String> {
        let lines: Vec<String> = sorted(vars)
            .into_iter()
            .map(|(key, value)| format!("{key}={}", escape_env_value(value)))
            .collect();

        Ok(lines.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, vars: &VarMap) -> Result<String> {
        serde_json::to_string_pretty(&sorted(vars)).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, vars: &VarMap) -> Result<String> {
        let text = serde_yaml::to_string(&sorted(vars)).map_err(|e| Error::Validation {
            field: "yaml_output".to_string(),
            message: format!("failed to serialize to YAML: {e}"),
        })?;

        Ok(text.trim_end().to_string())
    }
}
