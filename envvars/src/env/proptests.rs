//! Property-based tests for the env engine.

use super::*;
use proptest::prelude::*;
use std::path::Path;

fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
}

fn invalid_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9][A-Za-z0-9_]{0,10}", "[A-Za-z_]{1,5}[-.][A-Za-z0-9_]{1,5}"]
}

// Values that survive a trip through `KEY=value` without quoting
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:@=+-]{0,24}"
}

fn var_map_strategy() -> impl Strategy<Value = VarMap> {
    prop::collection::hash_map(valid_key_strategy(), plain_value_strategy(), 0..12)
}

fn parse(content: &str) -> EnvFile {
    EnvFile::parse_str(content, Path::new("prop.env")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Parsing an emitted value yields the same value
    #[test]
    fn reparse_of_emitted_value_is_stable(key in valid_key_strategy(), value in plain_value_strategy()) {
        let first = parse(&format!("{key}={value}")).to_map();
        let emitted = &first[&key];
        let second = parse(&format!("{key}={emitted}")).to_map();
        prop_assert_eq!(&second[&key], emitted);
        prop_assert_eq!(emitted, &value);
    }

    // Double-quoted values round-trip through unquote
    #[test]
    fn quoted_value_unquotes_to_inner_text(key in valid_key_strategy(), inner in "[A-Za-z0-9 _./:-]{0,24}") {
        let map = parse(&format!("{key}=\"{inner}\"")).to_map();
        prop_assert_eq!(&map[&key], &inner);
    }

    // Keys failing the identifier pattern never reach the merged output
    #[test]
    fn invalid_keys_never_merged(
        existing in var_map_strategy(),
        bad in invalid_key_strategy(),
        good in valid_key_strategy(),
        value in plain_value_strategy(),
    ) {
        let file = parse(&format!("{bad}={value}\n{good}={value}"));
        let merged = merge_env_file(&existing, &file).unwrap();
        prop_assert!(!merged.contains_key(&bad));
        prop_assert!(merged.keys().all(|k| is_valid_key(k)));
    }

    // One remove directive with several arguments equals several directives
    #[test]
    fn remove_arguments_split_freely(vars in var_map_strategy(), picks in prop::collection::vec(valid_key_strategy(), 0..5)) {
        let combined = vec![parse_directive(&format!("#remove {}", picks.join(" ")), 1).unwrap()];
        let split: Vec<Directive> = picks
            .iter()
            .enumerate()
            .map(|(i, k)| parse_directive(&format!("#remove {k}"), i + 1).unwrap())
            .collect();

        prop_assert_eq!(apply_remove(&vars, &combined), apply_remove(&vars, &split));
    }

    // filter and filter-unless with the same patterns partition the mapping
    #[test]
    fn filter_and_filter_unless_partition(vars in var_map_strategy(), prefix in "[A-Z]{1,2}") {
        let pattern = format!("{prefix}*");
        let filter = vec![parse_directive(&format!("#filter {pattern}"), 1).unwrap()];
        let keep = vec![parse_directive(&format!("#filter-unless {pattern}"), 1).unwrap()];

        let dropped = apply_filter(&vars, &filter);
        let kept = apply_filter_unless(&vars, &keep);

        prop_assert_eq!(dropped.len() + kept.len(), vars.len());
        prop_assert!(kept.keys().all(|k| matches_pattern(k, &pattern)));
        prop_assert!(dropped.keys().all(|k| !matches_pattern(k, &pattern)));
    }

    // Every key required by the file is present after a successful merge
    #[test]
    fn successful_merge_contains_required_keys(existing in var_map_strategy(), key in valid_key_strategy()) {
        let file = parse(&format!("#require {key}\n{key}=set"));
        let merged = merge_env_file(&existing, &file).unwrap();
        prop_assert_eq!(merged.get(&key).map(String::as_str), Some("set"));
    }
}
