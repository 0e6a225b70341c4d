//! Directive pipeline stages.
//!
//! Each stage takes a borrowed mapping and returns a new one, so no stage
//! ever observes another stage's partial work. Stages only act on directives
//! of their own kind and ignore everything else, including unknown names.

use super::directive::{Directive, DirectiveKind};
use super::pattern::KeyPattern;
use super::VarMap;
use crate::error::{Error, Result};

/// Arguments of every directive of `kind`, in file order.
fn arguments_of<'a>(
    directives: &'a [Directive],
    kind: &'a DirectiveKind,
) -> impl Iterator<Item = &'a str> + 'a {
    directives
        .iter()
        .filter(move |d| d.is(kind))
        .flat_map(|d| d.arguments.iter().map(String::as_str))
}

/// Applies `#remove` directives: drops every key equal to an argument,
/// ignoring case. Absent keys are not an error.
///
/// # Examples
///
/// ```
/// use envvars::env::{apply_remove, parse_directive, VarMap};
///
/// let mut vars = VarMap::new();
/// vars.insert("EXISTING_KEY".to_string(), "v".to_string());
/// vars.insert("OTHER".to_string(), "o".to_string());
///
/// let directives = vec![parse_directive("#remove existing_key", 1).unwrap()];
/// let result = apply_remove(&vars, &directives);
///
/// assert!(!result.contains_key("EXISTING_KEY"));
/// assert!(result.contains_key("OTHER"));
/// ```
#[must_use]
pub fn apply_remove(vars: &VarMap, directives: &[Directive]) -> VarMap {
    let mut result = vars.clone();

    for argument in arguments_of(directives, &DirectiveKind::Remove) {
        let folded = argument.to_lowercase();
        result.retain(|key, _| {
            let keep = key.to_lowercase() != folded;
            if !keep {
                log::debug!("removing key {key:?} (remove {argument:?})");
            }
            keep
        });
    }

    result
}

/// Applies `#filter` directives: drops every key matching any argument pattern.
///
/// # Examples
///
/// ```
/// use envvars::env::{apply_filter, parse_directive, VarMap};
///
/// let mut vars = VarMap::new();
/// vars.insert("DEBUG_SQL".to_string(), "1".to_string());
/// vars.insert("PORT".to_string(), "80".to_string());
///
/// let directives = vec![parse_directive("#filter debug_*", 1).unwrap()];
/// let result = apply_filter(&vars, &directives);
///
/// assert_eq!(result.len(), 1);
/// assert!(result.contains_key("PORT"));
/// ```
#[must_use]
pub fn apply_filter(vars: &VarMap, directives: &[Directive]) -> VarMap {
    let mut result = vars.clone();

    for pattern in arguments_of(directives, &DirectiveKind::Filter) {
        let matcher = KeyPattern::new(pattern);
        result.retain(|key, _| {
            let matched = matcher.matches(key);
            if matched {
                log::debug!("filtering key {key:?} (matches pattern {pattern:?})");
            }
            !matched
        });
    }

    result
}

/// Applies `#filter-unless` directives: keeps only keys matching at least one
/// pattern drawn from all such directives together.
///
/// With no patterns at all the mapping passes through unchanged.
///
/// # Examples
///
/// ```
/// use envvars::env::{apply_filter_unless, parse_directive, VarMap};
///
/// let mut vars = VarMap::new();
/// vars.insert("TEST_KEY".to_string(), "a".to_string());
/// vars.insert("KEY_PROD".to_string(), "b".to_string());
/// vars.insert("REGULAR_KEY".to_string(), "c".to_string());
///
/// let directives = vec![
///     parse_directive("#filter-unless TEST_*", 1).unwrap(),
///     parse_directive("#filter-unless *_PROD", 2).unwrap(),
/// ];
/// let result = apply_filter_unless(&vars, &directives);
///
/// assert_eq!(result.len(), 2);
/// assert!(!result.contains_key("REGULAR_KEY"));
/// ```
#[must_use]
pub fn apply_filter_unless(vars: &VarMap, directives: &[Directive]) -> VarMap {
    let patterns: Vec<KeyPattern> = arguments_of(directives, &DirectiveKind::FilterUnless)
        .map(KeyPattern::new)
        .collect();

    if patterns.is_empty() {
        return vars.clone();
    }

    vars.iter()
        .filter(|(key, _)| {
            let keep = patterns.iter().any(|pattern| pattern.matches(key));
            if !keep {
                log::debug!("filtering key {key:?} (matches no filter-unless pattern)");
            }
            keep
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Applies `#require` directives against the final mapping.
///
/// Lookups are exact and case-sensitive, unlike the other stages.
///
/// # Errors
///
/// Returns [`Error::MissingRequired`] for the first argument, in directive
/// then argument order, whose key is absent.
///
/// # Examples
///
/// ```
/// use envvars::env::{apply_require, parse_directive, VarMap};
///
/// let mut vars = VarMap::new();
/// vars.insert("EXISTING_KEY".to_string(), "v".to_string());
///
/// let ok = vec![parse_directive("#require EXISTING_KEY", 1).unwrap()];
/// assert!(apply_require(&vars, &ok).is_ok());
///
/// let wrong_case = vec![parse_directive("#require existing_key", 1).unwrap()];
/// let err = apply_require(&vars, &wrong_case).unwrap_err();
/// assert_eq!(err.to_string(), "required environment variable 'existing_key' not found");
/// ```
pub fn apply_require(vars: &VarMap, directives: &[Directive]) -> Result<()> {
    for key in arguments_of(directives, &DirectiveKind::Require) {
        if !vars.contains_key(key) {
            return Err(Error::MissingRequired {
                key: key.to_string(),
            });
        }
    }

    Ok(())
}
