//! Line classification for env files.

/// One classified line of an env file.
///
/// Borrowed slices point into the original line and are already trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// A `#` line that is not a directive.
    Comment,
    /// A `#name args...` line. Holds the whole trimmed line, `#` included.
    Directive(&'a str),
    /// A `KEY=VALUE` line split on the first `=`.
    Assignment {
        /// Trimmed text before the first `=`.
        key: &'a str,
        /// Trimmed text after the first `=`.
        raw_value: &'a str,
    },
    /// Anything else; carries no meaning.
    Other,
}

/// Classifies a single physical line.
///
/// A directive is a `#` immediately followed by a character that is neither
/// whitespace nor another `#`. Every other `#` line is a comment, including a
/// bare `#`, so file scanning never trips over an empty directive.
///
/// # Examples
///
/// ```
/// use envvars::env::{classify, Line};
///
/// assert_eq!(classify("  "), Line::Blank);
/// assert_eq!(classify("# a comment"), Line::Comment);
/// assert_eq!(classify("#remove OLD_KEY"), Line::Directive("#remove OLD_KEY"));
/// assert_eq!(
///     classify(" URL = a=b "),
///     Line::Assignment { key: "URL", raw_value: "a=b" }
/// );
/// ```
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(rest) = line.strip_prefix('#') {
        return match rest.chars().next() {
            Some(c) if !c.is_whitespace() && c != '#' => Line::Directive(line),
            _ => Line::Comment,
        };
    }

    match line.split_once('=') {
        Some((key, raw_value)) => Line::Assignment {
            key: key.trim(),
            raw_value: raw_value.trim(),
        },
        None => Line::Other,
    }
}
