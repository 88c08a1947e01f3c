use std::time::Duration;

use draw_watch_core::{Outcome, Snapshot};
use draw_watch_daemon::{build_agent, labels_from_json, HttpNotifier};
use draw_watch_supervisor::{normalize_labels, LabelRules};
use serde_json::json;

#[test]
fn notifier_appends_value_to_base_url() {
    let agent = build_agent(Duration::from_secs(5), "test");
    let n = HttpNotifier::new(agent, "https://collector.example/receive-number/");
    let url = n.url_for(Outcome::new(0).unwrap());
    assert_eq!(url, "https://collector.example/receive-number/0");
}

#[test]
fn mixed_feed_body_becomes_labels() {
    let body = json!([12, "5", " 7 ", null, "LIVE", 3]);
    let labels = labels_from_json(&body).unwrap();
    assert_eq!(labels, vec!["12", "5", " 7 ", "null", "LIVE", "3"]);

    let snap = normalize_labels(&labels, &LabelRules::default());
    assert_eq!(snap, Snapshot::from_values(&[12, 5, 7, 3]));
}

#[test]
fn non_array_body_has_no_labels() {
    assert!(labels_from_json(&json!({ "draws": [1, 2, 3] })).is_none());
}
