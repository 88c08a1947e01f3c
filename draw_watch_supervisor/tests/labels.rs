use draw_watch_core::{Slot, Snapshot};
use draw_watch_supervisor::{normalize_labels, LabelRules};

#[test]
fn full_read() {
    let snap = normalize_labels(&["12", " 5", "5 ", "0", "36", "9"], &LabelRules::default());
    assert_eq!(snap, Snapshot::from_values(&[12, 5, 5, 0, 36]));
}

#[test]
fn short_read_is_padded() {
    let snap = normalize_labels(&["4", "19", "21"], &LabelRules::default());
    assert_eq!(
        snap.slots(),
        &[
            Slot::Drawn(4),
            Slot::Drawn(19),
            Slot::Drawn(21),
            Slot::Pad,
            Slot::Pad
        ]
    );
}

#[test]
fn too_few_labels_is_degraded() {
    let snap = normalize_labels(&["4", "19"], &LabelRules::default());
    assert!(snap.is_degraded());

    let empty: [&str; 0] = [];
    assert!(normalize_labels(&empty, &LabelRules::default()).is_degraded());
}

#[test]
fn noise_is_filtered_by_default() {
    let snap = normalize_labels(
        &["LIVE", "", "40", "7", "x2", "3", "-1", "30"],
        &LabelRules::default(),
    );
    assert_eq!(snap, Snapshot::from_values(&[7, 3, 30]));
}

#[test]
fn noise_can_be_kept_for_inspection() {
    let rules = LabelRules {
        min_genuine: 1,
        drop_out_of_range: false,
        drop_unparsed: false,
    };
    let snap = normalize_labels(&["LIVE", "40", "7"], &rules);
    assert_eq!(
        snap.slots()[..3],
        [Slot::Garbled("LIVE".into()), Slot::Drawn(40), Slot::Drawn(7)]
    );
}
