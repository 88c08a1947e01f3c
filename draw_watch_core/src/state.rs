use crate::cfg::WatchCfg;
use crate::decide::Decision;
use crate::signature::Signature;

/// Everything the watch loop remembers between cycles. Memory-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrackerState {
    /// Signature of the last snapshot whose lead was delivered. `None` until the first delivery.
    pub last_accepted: Option<Signature>,
    pub consecutive_failures: u32,
}

impl TrackerState {
    /// Apply the failure-counter side of a decision.
    ///
    /// Never touches `last_accepted`; that only moves through `commit`.
    #[inline]
    pub fn observe(&mut self, decision: &Decision) {
        match decision {
            Decision::SampleFailure => self.record_failure(),
            Decision::NoChange | Decision::InvalidLeadValue(_) | Decision::NewOutcome { .. } => {
                self.reset_failures()
            }
        }
    }

    /// The sampler raised instead of returning a snapshot. Counts like a degraded read.
    #[inline]
    pub fn record_exception(&mut self) {
        self.record_failure();
    }

    #[inline]
    pub fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    #[inline]
    pub fn reset_failures(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Delivery succeeded: future snapshots are compared against this one.
    #[inline]
    pub fn commit(&mut self, sig: Signature) {
        self.last_accepted = Some(sig);
    }

    #[inline]
    pub fn failures_exhausted(&self, cfg: &WatchCfg) -> bool {
        self.consecutive_failures >= cfg.max_consecutive_failures
    }
}
