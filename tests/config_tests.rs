use chorus::Config;
use chorus::Source;
use chorus::common::CommonParams;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    config.validate().expect("defaults must validate");

    assert!(!config.sources.is_empty());
    assert_eq!(config.network.timeout_seconds, 15);
    assert_eq!(config.network.max_concurrent_calls, 4);
    assert_eq!(config.fusion.max_fused, 3);
    assert_eq!(config.scoring.min_length, 20);
}

#[test]
fn test_toml_round_trip_preserves_source_order() {
    let mut config = Config::default();
    config.sources = vec![
        Source::new("zulu", "https://z.example/api?prompt={prompt}"),
        Source::new("alpha", "https://a.example/api?prompt={prompt}"),
        Source::new("mike", "https://m.example/api?prompt={prompt}"),
    ];
    config.network.timeout_seconds = 7;
    config.scoring.length_bands = vec![(100, 5), (40, 2)];

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    let serialized = toml::to_string_pretty(&config).expect("config should serialize");
    fs::write(&path, serialized).expect("failed to write config");

    let reloaded: Config =
        toml::from_str(&fs::read_to_string(&path).expect("failed to read config"))
            .expect("config should parse");

    let names: Vec<_> = reloaded.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["zulu", "alpha", "mike"]);
    assert_eq!(reloaded.network.timeout_seconds, 7);
    assert_eq!(reloaded.scoring.length_bands, vec![(100, 5), (40, 2)]);
}

#[test]
fn test_partial_toml_fills_in_defaults() {
    let parsed: Config = toml::from_str(
        r#"
        [network]
        timeout_seconds = 3
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(parsed.network.timeout_seconds, 3);
    // Everything else falls back to defaults
    assert_eq!(parsed.network.max_concurrent_calls, 4);
    assert!(!parsed.sources.is_empty());
    assert_eq!(parsed.fusion.max_fused, 3);
}

#[test]
fn test_update_rejects_unusable_values() {
    let mut config = Config::default();
    assert!(config.update(Some(0), None, None, None, None).is_err());
    assert!(config.update(None, Some(0), None, None, None).is_err());
    assert!(config.update(None, None, Some(0), None, None).is_err());
    assert!(
        config
            .update(None, None, None, None, Some("no-such-source".to_string()))
            .is_err()
    );
    assert!(
        config
            .update(
                None,
                None,
                None,
                Some(("bad".to_string(), "https://example.com/api".to_string())),
                None,
            )
            .is_err(),
        "templates without a {{prompt}} placeholder must be rejected"
    );
}

#[test]
fn test_update_replaces_source_with_same_name() {
    let mut config = Config::default();
    let before = config.sources.len();
    config
        .update(
            None,
            None,
            None,
            Some((
                "gemini".to_string(),
                "https://other.example/v2?prompt={prompt}".to_string(),
            )),
            None,
        )
        .expect("replacing a source should work");

    assert_eq!(config.sources.len(), before);
    let replaced = config.get_source("gemini").expect("gemini should exist");
    assert_eq!(replaced.url_template, "https://other.example/v2?prompt={prompt}");
}

#[test]
fn test_common_params_filter_keeps_configured_order() {
    let mut config = Config::default();
    config.sources = vec![
        Source::new("one", "https://1.example?prompt={prompt}"),
        Source::new("two", "https://2.example?prompt={prompt}"),
        Source::new("three", "https://3.example?prompt={prompt}"),
    ];

    let params = CommonParams {
        timeout: Some(5),
        concurrency: None,
        sources: Some(vec!["three".to_string(), "one".to_string()]),
    };
    params
        .apply_to_config(&mut config)
        .expect("filter should apply");

    // Selection order does not matter; configuration order is preserved
    let names: Vec<_> = config.sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["one", "three"]);
    assert_eq!(config.network.timeout_seconds, 5);
}

#[test]
fn test_common_params_reject_unknown_source() {
    let mut config = Config::default();
    let params = CommonParams {
        timeout: None,
        concurrency: None,
        sources: Some(vec!["does-not-exist".to_string()]),
    };
    assert!(params.apply_to_config(&mut config).is_err());
}
