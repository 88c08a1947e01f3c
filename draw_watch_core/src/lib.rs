pub mod snapshot;
pub mod signature;

pub mod cfg;
pub mod state;
pub mod decide;

pub use snapshot::{Outcome, Slot, Snapshot, OUTCOME_MAX, SNAPSHOT_WIDTH};
pub use signature::{signature, Signature};

pub use cfg::WatchCfg;
pub use state::TrackerState;
pub use decide::{Decision, LeadRejection, check_lead, evaluate_cycle, is_degraded};
