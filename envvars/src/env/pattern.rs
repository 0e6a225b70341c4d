//! Key pattern matching for `filter` and `filter-unless` directives.

use regex::Regex;

/// A compiled `filter` / `filter-unless` pattern.
///
/// A pattern containing `*` is turned into an anchored, case-insensitive
/// regular expression with each `*` replaced by `.*`; other characters are
/// passed through to the regex engine unchanged. If that expression fails to
/// compile, the pattern falls back to plain equality. Patterns without `*`
/// require exact case-insensitive equality.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    folded: String,
    regex: Option<Regex>,
}

impl KeyPattern {
    /// Compiles `pattern` once for repeated matching.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let folded = pattern.to_lowercase();
        let regex = if folded.contains('*') {
            Regex::new(&format!("^{}$", folded.replace('*', ".*"))).ok()
        } else {
            None
        };
        Self { folded, regex }
    }

    /// Tests `key` against this pattern, ignoring case.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        match &self.regex {
            Some(re) => re.is_match(&key),
            None => key == self.folded,
        }
    }
}

/// Tests a key against a directive pattern, ignoring case.
///
/// One-off form of [`KeyPattern::matches`].
///
/// # Examples
///
/// ```
/// use envvars::env::matches_pattern;
///
/// assert!(matches_pattern("TEST_KEY1", "test_*"));
/// assert!(matches_pattern("KEY_PROD", "*_PROD"));
/// assert!(matches_pattern("Api_Key", "API_KEY"));
/// assert!(!matches_pattern("REGULAR_KEY", "TEST_*"));
/// ```
#[must_use]
pub fn matches_pattern(key: &str, pattern: &str) -> bool {
    KeyPattern::new(pattern).matches(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert!(matches_pattern("EXISTING_KEY", "existing_key"));
        assert!(matches_pattern("existing_key", "EXISTING_KEY"));
        assert!(!matches_pattern("EXISTING_KEY", "EXISTING"));
    }

    #[test]
    fn test_prefix_and_suffix_wildcards() {
        assert!(matches_pattern("TEST_KEY1", "TEST_*"));
        assert!(matches_pattern("TEST_", "TEST_*"));
        assert!(!matches_pattern("MY_TEST_KEY", "TEST_*"));
        assert!(matches_pattern("OTHER_PROD", "*_PROD"));
        assert!(!matches_pattern("PROD_OTHER", "*_PROD"));
    }

    #[test]
    fn test_infix_and_multiple_wildcards() {
        assert!(matches_pattern("APP_DB_HOST", "APP_*_HOST"));
        assert!(matches_pattern("APP_HOST_X", "*HOST*"));
        assert!(matches_pattern("ANYTHING", "*"));
        assert!(matches_pattern("", "*"));
    }

    #[test]
    fn test_empty_key_and_pattern() {
        assert!(matches_pattern("", ""));
        assert!(!matches_pattern("KEY", ""));
        assert!(!matches_pattern("", "KEY"));
    }

    #[test]
    fn test_compiled_pattern_reused_across_keys() {
        let pattern = KeyPattern::new("TEST_*");
        let keys = ["TEST_A", "test_b", "OTHER", "MY_TEST_C"];
        let matched: Vec<&str> = keys.into_iter().filter(|k| pattern.matches(k)).collect();
        assert_eq!(matched, vec!["TEST_A", "test_b"]);

        let exact = KeyPattern::new("Api_Key");
        assert!(exact.matches("API_KEY"));
        assert!(!exact.matches("API_KEY2"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_equality() {
        assert!(!matches_pattern("KEY", "KEY(*"));
        assert!(matches_pattern("key(*", "KEY(*"));
    }
}
