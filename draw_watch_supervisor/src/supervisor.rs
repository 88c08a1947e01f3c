//! The watch loop.
//!
//! One sequential task owns the tracker state, the live session and the
//! notifier. Each cycle: sample -> evaluate -> (maybe) notify -> (maybe)
//! restart -> pace. Only a failed re-acquisition or the caller's shutdown
//! future ends the loop.

use std::future::Future;
use std::time::Duration;

use draw_watch_core::{evaluate_cycle, Decision, LeadRejection, Snapshot, TrackerState, WatchCfg};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::adapter::{FeedSession, FeedSource, Notifier};
use crate::error::{AcquisitionError, NotifyError, SampleError, WatchError};
use crate::session::SessionGuard;

/// Running counters, useful for logging without re-deriving anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WatchStats {
    pub cycles: u64,
    /// Outcomes the collector acknowledged.
    pub notified: u64,
    pub notify_failures: u64,
    /// Degraded snapshots plus sampler errors.
    pub sample_failures: u64,
    pub invalid_leads: u64,
    pub restarts: u64,
}

/// What a single cycle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// `None` when the sampler raised and no snapshot was evaluated.
    pub decision: Option<Decision>,
    pub notified: bool,
    pub restarted: bool,
    /// Pause the loop takes before the next cycle.
    pub delay: Duration,
}

/// Why `run` returned without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
}

pub struct WatchSupervisor<S: FeedSource, N: Notifier> {
    cfg: WatchCfg,
    state: TrackerState,
    source: S,
    notifier: N,
    session: SessionGuard<S::Session>,
    stats: WatchStats,
}

impl<S: FeedSource, N: Notifier> WatchSupervisor<S, N> {
    pub fn new(cfg: WatchCfg, source: S, notifier: N) -> Self {
        Self {
            cfg,
            state: TrackerState::default(),
            source,
            notifier,
            session: SessionGuard::empty(),
            stats: WatchStats::default(),
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn stats(&self) -> WatchStats {
        self.stats
    }

    pub fn has_session(&self) -> bool {
        self.session.is_live()
    }

    /// Acquire a fresh session and give it `session_warmup` to settle.
    pub async fn acquire(&mut self) -> Result<(), AcquisitionError> {
        info!("acquiring feed session");
        let session = self.source.acquire(&self.cfg).await?;
        self.session.replace(session);
        debug!(warmup = ?self.cfg.session_warmup(), "session acquired, warming up");
        sleep(self.cfg.session_warmup()).await;
        Ok(())
    }

    /// Release the current session, cool down, acquire a new one.
    async fn restart(&mut self) -> Result<(), AcquisitionError> {
        warn!(
            failures = self.state.consecutive_failures,
            "too many consecutive sampling failures, restarting session"
        );
        self.session.release();
        sleep(self.cfg.restart_cooldown()).await;

        match self.acquire().await {
            Ok(()) => {
                self.state.reset_failures();
                self.stats.restarts += 1;
                info!(restarts = self.stats.restarts, "session restarted");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "session restart failed");
                Err(e)
            }
        }
    }

    async fn sample(&mut self) -> Result<Snapshot, SampleError> {
        let limit = self.cfg.sample_timeout();
        let Some(session) = self.session.get_mut() else {
            return Err(SampleError::SessionLost("no live session".to_string()));
        };
        match timeout(limit, session.sample()).await {
            Ok(res) => res,
            Err(_) => Err(SampleError::Timeout(limit)),
        }
    }

    async fn notify(&mut self, value: draw_watch_core::Outcome) -> Result<(), NotifyError> {
        let limit = self.cfg.notify_timeout();
        match timeout(limit, self.notifier.notify(value)).await {
            Ok(res) => res,
            Err(_) => Err(NotifyError::Timeout(limit)),
        }
    }

    /// Run exactly one sample -> evaluate -> notify -> escalate pass.
    ///
    /// Does not sleep for pacing; the returned report carries the delay.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, WatchError> {
        self.stats.cycles += 1;

        let mut report = CycleReport {
            decision: None,
            notified: false,
            restarted: false,
            delay: self.cfg.cycle_delay(),
        };

        match self.sample().await {
            Err(e) => {
                self.state.record_exception();
                self.stats.sample_failures += 1;
                warn!(
                    error = %e,
                    failures = self.state.consecutive_failures,
                    "sampler raised"
                );
                report.delay = self.cfg.error_delay();
            }
            Ok(snapshot) => {
                let decision = evaluate_cycle(&snapshot, &self.state);
                self.state.observe(&decision);
                debug!(kind = decision.kind(), failures = self.state.consecutive_failures, "cycle evaluated");
                report.notified = self.apply(&snapshot, &decision).await;
                report.decision = Some(decision);
            }
        }

        if self.state.failures_exhausted(&self.cfg) {
            self.restart().await?;
            report.restarted = true;
        }

        Ok(report)
    }

    /// Act on a decision. Returns whether the collector acknowledged an outcome.
    async fn apply(&mut self, snapshot: &Snapshot, decision: &Decision) -> bool {
        match decision {
            Decision::SampleFailure => {
                self.stats.sample_failures += 1;
                debug!(failures = self.state.consecutive_failures, "degraded snapshot");
                false
            }
            Decision::NoChange => {
                debug!(%snapshot, "no change");
                false
            }
            Decision::InvalidLeadValue(why) => {
                self.stats.invalid_leads += 1;
                match why {
                    LeadRejection::Pad => warn!(%snapshot, "lead slot is padding, not forwarding"),
                    LeadRejection::OutOfRange(n) => {
                        warn!(%snapshot, value = n, "lead value out of range")
                    }
                    LeadRejection::NonNumeric(s) => {
                        warn!(%snapshot, label = %s, "lead value is not a number")
                    }
                }
                false
            }
            Decision::NewOutcome { value, signature } => {
                info!(
                    outcome = %value,
                    previous = ?self.state.last_accepted.as_ref().map(|s| s.as_str()),
                    current = %signature,
                    "new outcome"
                );
                match self.notify(*value).await {
                    Ok(()) => {
                        self.state.commit(signature.clone());
                        self.stats.notified += 1;
                        info!(outcome = %value, total = self.stats.notified, "outcome delivered");
                        true
                    }
                    Err(e) => {
                        self.stats.notify_failures += 1;
                        error!(outcome = %value, error = %e, "delivery failed, will retry while it leads");
                        false
                    }
                }
            }
        }
    }

    async fn drive(&mut self) -> WatchError {
        if !self.session.is_live() {
            if let Err(e) = self.acquire().await {
                error!(error = %e, "initial session acquisition failed");
                return e.into();
            }
        }
        info!("watching feed");

        loop {
            match self.run_cycle().await {
                Ok(report) => sleep(report.delay).await,
                Err(e) => return e,
            }
        }
    }

    /// Watch until a restart fails or `shutdown` resolves.
    ///
    /// The session is released on every exit path.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<StopReason, WatchError>
    where
        F: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            err = self.drive() => Err(err),
            () = shutdown => {
                info!("shutdown requested");
                Ok(StopReason::Interrupted)
            }
        };

        self.session.release();
        info!(
            delivered = self.stats.notified,
            restarts = self.stats.restarts,
            "session released, watch stopped"
        );
        outcome
    }
}
