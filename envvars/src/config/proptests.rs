//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, SourceConfig};
use crate::output::OutputFormat;
use proptest::prelude::*;
use std::path::PathBuf;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Env),
        Just(OutputFormat::Json),
        Just(OutputFormat::Yaml)
    ]
}

fn sources_strategy() -> impl Strategy<Value = Option<Vec<SourceConfig>>> {
    prop::option::of(prop::collection::vec(
        "[a-z]{1,8}\\.env".prop_map(|p| SourceConfig {
            path: PathBuf::from(p),
            kind: None,
        }),
        0..4,
    ))
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (prop::option::of(format_strategy()), sources_strategy()).prop_map(|(format, sources)| {
        Config {
            format,
            sources,
            sops_age_key_file: None,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // The higher layer's format wins whenever it is set
    #[test]
    fn format_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);
        prop_assert_eq!(merged.format, high.format.or(low.format));
    }

    // Source lists concatenate, lower layer first
    #[test]
    fn sources_concatenate(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        let expected: Vec<SourceConfig> = low
            .sources
            .iter()
            .flatten()
            .chain(high.sources.iter().flatten())
            .cloned()
            .collect();
        prop_assert_eq!(merged.sources.unwrap_or_default(), expected);
    }

    // Merging an empty layer changes nothing
    #[test]
    fn empty_layer_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }
}
