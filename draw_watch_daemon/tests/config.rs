use std::collections::HashMap;

use draw_watch_daemon::config::{COLLECTOR_URL_VAR, FEED_URL_VAR};
use draw_watch_daemon::{ConfigError, DaemonConfig};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn env_only() {
    let cfg = DaemonConfig::from_sources(
        None,
        env(&[
            (FEED_URL_VAR, "http://127.0.0.1:9230/draws"),
            (COLLECTOR_URL_VAR, "https://collector.example/receive/"),
        ]),
    )
    .unwrap();
    assert_eq!(cfg.feed_url, "http://127.0.0.1:9230/draws");
    assert_eq!(cfg.watch.cycle_delay_secs, 3);
    assert_eq!(cfg.watch.max_consecutive_failures, 10);
    assert_eq!(cfg.label_rules().min_genuine, 3);
}

#[test]
fn file_with_partial_watch_section() {
    let file = r#"{
        "feed_url": "http://feed.local/draws",
        "collector_url": "http://collector.local/n/",
        "watch": { "cycle_delay_secs": 1, "max_consecutive_failures": 4 }
    }"#;
    let cfg = DaemonConfig::from_sources(Some(file), env(&[])).unwrap();
    assert_eq!(cfg.watch.cycle_delay_secs, 1);
    assert_eq!(cfg.watch.max_consecutive_failures, 4);
    assert_eq!(cfg.watch.error_delay_secs, 5);
    assert_eq!(cfg.watch.session_warmup_secs, 15);
}

#[test]
fn env_overrides_file() {
    let file = r#"{ "feed_url": "http://feed.local/draws", "collector_url": "http://old/" }"#;
    let cfg = DaemonConfig::from_sources(Some(file), env(&[(COLLECTOR_URL_VAR, "http://new/")]))
        .unwrap();
    assert_eq!(cfg.collector_url, "http://new/");
}

#[test]
fn missing_urls_are_rejected() {
    let err = DaemonConfig::from_sources(None, env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(var) if var == FEED_URL_VAR));

    let err = DaemonConfig::from_sources(
        None,
        env(&[(FEED_URL_VAR, "http://feed/"), (COLLECTOR_URL_VAR, "collector")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { field: "collector_url", .. }));
}

#[test]
fn zero_threshold_is_rejected() {
    let file = r#"{
        "feed_url": "http://feed/",
        "collector_url": "http://collector/",
        "watch": { "max_consecutive_failures": 0 }
    }"#;
    let err = DaemonConfig::from_sources(Some(file), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroThreshold));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let err = DaemonConfig::from_sources(Some("{ nope"), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn min_labels_must_fit_in_a_snapshot() {
    let file = r#"{
        "feed_url": "http://feed/",
        "collector_url": "http://collector/",
        "min_labels": 6
    }"#;
    let err = DaemonConfig::from_sources(Some(file), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MinLabelsOutOfRange { value: 6, max: 5 }));

    let zero = file.replace("\"min_labels\": 6", "\"min_labels\": 0");
    let err = DaemonConfig::from_sources(Some(&zero), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MinLabelsOutOfRange { value: 0, .. }));

    let widest = file.replace("\"min_labels\": 6", "\"min_labels\": 5");
    let cfg = DaemonConfig::from_sources(Some(&widest), env(&[])).unwrap();
    assert_eq!(cfg.label_rules().min_genuine, 5);
}
