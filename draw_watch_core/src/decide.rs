//draw_watch_core/decide.rs

use serde::Deserialize;
use serde::Serialize;

use crate::{
    signature::{signature, Signature},
    snapshot::{Outcome, Slot, Snapshot},
    state::TrackerState,
};

/// Why a changed snapshot's lead value was not forwarded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadRejection {
    /// The lead slot is filler, not a sampled draw.
    Pad,
    OutOfRange(i64),
    NonNumeric(String),
}

/// Outcome of one tracker evaluation. The caller applies the state transition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    /// Nothing usable came back from the source.
    SampleFailure,
    /// Same snapshot as the last delivered one.
    NoChange,
    InvalidLeadValue(LeadRejection),
    NewOutcome { value: Outcome, signature: Signature },
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::SampleFailure => "sample_failure",
            Decision::NoChange => "no_change",
            Decision::InvalidLeadValue(_) => "invalid_lead_value",
            Decision::NewOutcome { .. } => "new_outcome",
        }
    }
}

/// True iff the snapshot carries no sampled slot at all.
#[inline]
pub fn is_degraded(snapshot: &Snapshot) -> bool {
    snapshot.is_degraded()
}

/// Classify the lead slot of a changed snapshot.
pub fn check_lead(slot: &Slot) -> Result<Outcome, LeadRejection> {
    match slot {
        Slot::Pad => Err(LeadRejection::Pad),
        Slot::Drawn(n) => Outcome::try_from(*n).map_err(LeadRejection::OutOfRange),
        Slot::Garbled(s) => Err(LeadRejection::NonNumeric(s.clone())),
    }
}

/// Decide what one sampled snapshot means relative to the tracker state.
///
/// Pure: reads `state`, never mutates it.
pub fn evaluate_cycle(snapshot: &Snapshot, state: &TrackerState) -> Decision {
    if is_degraded(snapshot) {
        return Decision::SampleFailure;
    }

    let sig = signature(snapshot);
    if state.last_accepted.as_ref() == Some(&sig) {
        return Decision::NoChange;
    }

    match check_lead(snapshot.lead()) {
        Ok(value) => Decision::NewOutcome { value, signature: sig },
        Err(why) => Decision::InvalidLeadValue(why),
    }
}
