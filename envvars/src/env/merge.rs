//! Merging an env file into an accumulated mapping.

use std::path::Path;

use super::parser::EnvFile;
use super::pipeline::{apply_filter, apply_filter_unless, apply_remove, apply_require};
use super::VarMap;
use crate::error::Result;

/// Parses `path` and merges it into `existing`.
///
/// The stages run in a fixed order: remove (against `existing`), overlay the
/// file's variables, filter, filter-unless, and finally require. The file's
/// values always win over carried-forward ones.
///
/// # Errors
///
/// Returns any parse error from [`EnvFile::parse`], or
/// [`crate::Error::MissingRequired`] from the require stage. On error no
/// partial result is returned; `existing` is left untouched.
///
/// # Examples
///
/// ```no_run
/// use envvars::env::{merge_file, VarMap};
/// use std::path::Path;
///
/// let base = merge_file(&VarMap::new(), Path::new("base.env")).unwrap();
/// let merged = merge_file(&base, Path::new("local.env")).unwrap();
/// ```
pub fn merge_file(existing: &VarMap, path: &Path) -> Result<VarMap> {
    let file = EnvFile::parse(path)?;
    merge_env_file(existing, &file)
}

/// Merges an already parsed env file into `existing`.
///
/// # Errors
///
/// Returns [`crate::Error::MissingRequired`] if a `#require` directive names
/// a key missing from the merged result.
///
/// # Examples
///
/// ```
/// use envvars::env::{merge_env_file, EnvFile, VarMap};
/// use std::path::Path;
///
/// let mut existing = VarMap::new();
/// existing.insert("EXISTING_KEY1".to_string(), "v1".to_string());
/// existing.insert("EXISTING_KEY2".to_string(), "v2".to_string());
///
/// let file = EnvFile::parse_str(
///     "#require EXISTING_KEY1\n#remove EXISTING_KEY2\nKEY1=value1",
///     Path::new("app.env"),
/// )
/// .unwrap();
///
/// let merged = merge_env_file(&existing, &file).unwrap();
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged["KEY1"], "value1");
/// ```
pub fn merge_env_file(existing: &VarMap, file: &EnvFile) -> Result<VarMap> {
    let directives = &file.directives;

    let mut merged = apply_remove(existing, directives);
    for variable in &file.variables {
        merged.insert(variable.key.clone(), variable.value.clone());
    }

    let merged = apply_filter(&merged, directives);
    let merged = apply_filter_unless(&merged, directives);
    apply_require(&merged, directives)?;

    log::debug!(
        "merged {}: {} key(s) in, {} key(s) out",
        file.path.display(),
        existing.len(),
        merged.len()
    );

    Ok(merged)
}
