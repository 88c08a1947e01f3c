use std::time::Duration;

/// Pacing and escalation knobs for the watch loop.
///
/// Delays are whole seconds so the struct maps directly onto a config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WatchCfg {
    /// Pause between ordinary cycles.
    pub cycle_delay_secs: u64,
    /// Pause after a cycle that hit an unexpected sampling error.
    pub error_delay_secs: u64,
    /// Consecutive sampling failures that trigger a session restart.
    pub max_consecutive_failures: u32,
    /// Time given to a freshly acquired session before the first sample.
    pub session_warmup_secs: u64,
    /// Pause between releasing a dead session and acquiring a new one.
    pub restart_cooldown_secs: u64,
    /// Upper bound on a single sample call.
    pub sample_timeout_secs: u64,
    /// Upper bound on a single notify call.
    pub notify_timeout_secs: u64,
}

impl Default for WatchCfg {
    fn default() -> Self {
        Self {
            cycle_delay_secs: 3,
            error_delay_secs: 5,
            max_consecutive_failures: 10,
            session_warmup_secs: 15,
            restart_cooldown_secs: 5,
            sample_timeout_secs: 10,
            notify_timeout_secs: 5,
        }
    }
}

impl WatchCfg {
    #[inline]
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_secs(self.cycle_delay_secs)
    }

    #[inline]
    pub fn error_delay(&self) -> Duration {
        Duration::from_secs(self.error_delay_secs)
    }

    #[inline]
    pub fn session_warmup(&self) -> Duration {
        Duration::from_secs(self.session_warmup_secs)
    }

    #[inline]
    pub fn restart_cooldown(&self) -> Duration {
        Duration::from_secs(self.restart_cooldown_secs)
    }

    #[inline]
    pub fn sample_timeout(&self) -> Duration {
        Duration::from_secs(self.sample_timeout_secs)
    }

    #[inline]
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_secs)
    }
}
