//! draw_watch_supervisor
//!
//! Resilience layer around `draw_watch_core`.
//!
//! Responsibilities:
//! - own the `TrackerState` and the single live feed session
//! - run the sample -> evaluate -> notify cycle forever
//! - turn a run of sampling failures into one session restart
//! - pace cycles and bound every adapter call with a deadline
//!
//! Non-goals:
//! - no browser automation, no HTTP client (adapters live in the daemon)
//! - no persistence; state resets with the process

pub mod adapter;
pub mod error;
pub mod session;
pub mod supervisor;

pub use adapter::{
    FeedSession,
    FeedSource,
    Notifier,
    LabelRules,
    normalize_labels,
};

pub use error::{AcquisitionError, NotifyError, SampleError, WatchError};
pub use session::SessionGuard;

pub use supervisor::{
    WatchSupervisor,
    WatchStats,
    CycleReport,
    StopReason,
};
