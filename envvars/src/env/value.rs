//! Value normalization: quote stripping and `${NAME}` reference resolution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("reference pattern is valid"));

/// Strips one pair of surrounding quotes and unescapes the quote character.
///
/// Double quotes are checked first, then single quotes. A value consisting
/// of a single quote character starts and ends with that quote, so it
/// unquotes to the empty string.
///
/// # Examples
///
/// ```
/// use envvars::env::unquote;
///
/// assert_eq!(unquote(r#""say \"hi\"""#), r#"say "hi""#);
/// assert_eq!(unquote("'single quoted'"), "single quoted");
/// assert_eq!(unquote("unquoted"), "unquoted");
/// assert_eq!(unquote("\""), "");
/// ```
#[must_use]
pub fn unquote(raw: &str) -> String {
    let value = raw.trim();

    if let Some(inner) = strip_pair(value, '"') {
        return inner.replace("\\\"", "\"");
    }

    if let Some(inner) = strip_pair(value, '\'') {
        return inner.replace("\\'", "'");
    }

    value.to_string()
}

/// Returns the text between a leading and trailing `quote`, if present.
fn strip_pair(value: &str, quote: char) -> Option<&str> {
    if !value.starts_with(quote) || !value.ends_with(quote) {
        return None;
    }
    let width = quote.len_utf8();
    if value.len() <= width {
        return Some("");
    }
    Some(&value[width..value.len() - width])
}

/// Replaces every `${NAME}` with `variables[NAME]`, leaving unknown names as-is.
///
/// Substitution is a single left-to-right pass; substituted text is never
/// rescanned, so values containing `${...}` are not expanded recursively.
///
/// # Examples
///
/// ```
/// use envvars::env::resolve_references;
/// use std::collections::HashMap;
///
/// let mut table = HashMap::new();
/// table.insert("HOST".to_string(), "localhost".to_string());
///
/// assert_eq!(resolve_references("http://${HOST}:${PORT}", &table), "http://localhost:${PORT}");
/// ```
#[must_use]
pub fn resolve_references(value: &str, variables: &HashMap<String, String>) -> String {
    REFERENCE
        .replace_all(value, |caps: &Captures<'_>| match variables.get(&caps[1]) {
            Some(resolved) => resolved.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
