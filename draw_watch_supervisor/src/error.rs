use std::time::Duration;

/// A sampler call that raised instead of returning a (possibly degraded) snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("session is no longer usable: {0}")]
    SessionLost(String),

    #[error("sample did not complete within {0:?}")]
    Timeout(Duration),

    #[error("sampling failed: {0}")]
    Source(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),

    #[error("session setup failed: {0}")]
    Setup(String),
}

/// Delivery to the collector failed. Never retried by the notifier itself.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("collector answered with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("collector did not answer within {0:?}")]
    Timeout(Duration),
}

/// The only ways the watch loop ends on its own.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("session re-acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),
}
