//! Directive comments (`#name ARG...`) and their parser.

use std::fmt;

use crate::error::DirectiveError;

/// The pipeline stage a directive belongs to.
///
/// Resolved once, case-insensitively, when the directive is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#remove KEY...`: drop carried-over keys before the file is overlaid.
    Remove,
    /// `#require KEY...`: fail unless each key is present after merging.
    Require,
    /// `#filter PATTERN...`: drop matching keys after merging.
    Filter,
    /// `#filter-unless PATTERN...`: keep only matching keys after merging.
    FilterUnless,
    /// Any other name. Parsed, but ignored by every stage.
    Unknown,
}

impl DirectiveKind {
    /// Resolves a directive name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use envvars::env::DirectiveKind;
    ///
    /// assert_eq!(DirectiveKind::from_name("REMOVE"), DirectiveKind::Remove);
    /// assert_eq!(DirectiveKind::from_name("Filter-Unless"), DirectiveKind::FilterUnless);
    /// assert_eq!(DirectiveKind::from_name("include"), DirectiveKind::Unknown);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "remove" => Self::Remove,
            "require" => Self::Require,
            "filter" => Self::Filter,
            "filter-unless" => Self::FilterUnless,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove => write!(f, "remove"),
            Self::Require => write!(f, "require"),
            Self::Filter => write!(f, "filter"),
            Self::FilterUnless => write!(f, "filter-unless"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A parsed directive comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The name as written in the file.
    pub name: String,
    /// The stage this directive feeds.
    pub kind: DirectiveKind,
    /// Arguments in file order.
    pub arguments: Vec<String>,
    /// 1-based line number in the source file.
    pub line: usize,
}

impl Directive {
    /// Returns true if this directive belongs to the given stage.
    #[must_use]
    pub fn is(&self, kind: &DirectiveKind) -> bool {
        &self.kind == kind
    }
}

/// Parses a directive comment line.
///
/// The leading `#` is stripped, the rest is split on whitespace, and the
/// first token becomes the name. A directive with no arguments is valid.
///
/// # Errors
///
/// Returns [`DirectiveError::Empty`] if nothing but whitespace follows the `#`.
///
/// # Examples
///
/// ```
/// use envvars::env::{parse_directive, DirectiveKind};
///
/// let directive = parse_directive("#Remove KEY1  KEY2", 4).unwrap();
/// assert_eq!(directive.name, "Remove");
/// assert_eq!(directive.kind, DirectiveKind::Remove);
/// assert_eq!(directive.arguments, vec!["KEY1", "KEY2"]);
/// assert_eq!(directive.line, 4);
///
/// assert!(parse_directive("#   ", 5).is_err());
/// ```
pub fn parse_directive(line: &str, line_number: usize) -> Result<Directive, DirectiveError> {
    let text = line.trim();
    let text = text.strip_prefix('#').unwrap_or(text);

    let mut parts = text.split_whitespace();
    let name = parts
        .next()
        .ok_or(DirectiveError::Empty { line: line_number })?;

    Ok(Directive {
        name: name.to_string(),
        kind: DirectiveKind::from_name(name),
        arguments: parts.map(str::to_string).collect(),
        line: line_number,
    })
}
