//! Adapter seams between the watch loop and the outside world.
//!
//! The supervisor never talks to a browser, a feed or a collector directly:
//! - a `FeedSource` hands out `FeedSession`s (acquire)
//! - a `FeedSession` yields snapshots (sample) and can be torn down (release)
//! - a `Notifier` delivers one outcome
//!
//! `normalize_labels` turns raw text labels read from a page or feed into a
//! `Snapshot`, so concrete sessions only have to fetch strings.

use std::future::Future;

use draw_watch_core::{Outcome, Slot, Snapshot, WatchCfg, SNAPSHOT_WIDTH};

use crate::error::{AcquisitionError, NotifyError, SampleError};

/// A live connection to the draw source.
pub trait FeedSession {
    /// Read the most recent draws.
    ///
    /// Unusable data should come back as `Snapshot::degraded()`; reserve `Err`
    /// for a session that has stopped working.
    fn sample(&mut self) -> impl Future<Output = Result<Snapshot, SampleError>>;

    /// Tear the session down. Idempotent and infallible.
    fn release(&mut self);
}

/// Factory for sessions. Called once at start-up and once per restart.
pub trait FeedSource {
    type Session: FeedSession;

    fn acquire(
        &mut self,
        cfg: &WatchCfg,
    ) -> impl Future<Output = Result<Self::Session, AcquisitionError>>;
}

/// Delivers a validated outcome to the collector. One attempt, no retries.
pub trait Notifier {
    fn notify(&mut self, outcome: Outcome) -> impl Future<Output = Result<(), NotifyError>>;
}

/// How raw labels are filtered before they become slots.
#[derive(Clone, Copy, Debug)]
pub struct LabelRules {
    /// Reads with fewer kept labels than this are treated as degraded.
    pub min_genuine: usize,
    /// Skip integer labels outside `0..=36`.
    pub drop_out_of_range: bool,
    /// Skip labels that are not integers instead of keeping them as `Garbled`.
    pub drop_unparsed: bool,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            min_genuine: 3,
            drop_out_of_range: true,
            drop_unparsed: true,
        }
    }
}

impl LabelRules {
    fn slot_for(&self, label: &str) -> Option<Slot> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        match label.parse::<i64>() {
            Ok(n) => {
                if self.drop_out_of_range && Outcome::try_from(n).is_err() {
                    None
                } else {
                    Some(Slot::Drawn(n))
                }
            }
            Err(_) if self.drop_unparsed => None,
            Err(_) => Some(Slot::Garbled(label.to_string())),
        }
    }
}

/// Build a snapshot from raw labels, newest first.
///
/// Keeps at most `SNAPSHOT_WIDTH` labels. A read that keeps fewer than
/// `rules.min_genuine` is considered untrustworthy and comes back degraded.
pub fn normalize_labels<S: AsRef<str>>(labels: &[S], rules: &LabelRules) -> Snapshot {
    let kept: Vec<Slot> = labels
        .iter()
        .filter_map(|l| rules.slot_for(l.as_ref()))
        .take(SNAPSHOT_WIDTH)
        .collect();

    if kept.is_empty() || kept.len() < rules.min_genuine {
        return Snapshot::degraded();
    }
    Snapshot::from_slots(kept)
}
