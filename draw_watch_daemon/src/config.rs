//! Process configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. JSON file named by `DRAW_WATCH_CONFIG`
//! 3. `DRAW_WATCH_FEED_URL` / `DRAW_WATCH_COLLECTOR_URL`

use std::path::PathBuf;

use draw_watch_core::{WatchCfg, SNAPSHOT_WIDTH};
use draw_watch_supervisor::LabelRules;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_VAR: &str = "DRAW_WATCH_CONFIG";
pub const FEED_URL_VAR: &str = "DRAW_WATCH_FEED_URL";
pub const COLLECTOR_URL_VAR: &str = "DRAW_WATCH_COLLECTOR_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{field} must be an http(s) URL, got {value:?}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("max_consecutive_failures must be at least 1")]
    ZeroThreshold,

    #[error("min_labels must be between 1 and {max}, got {value}")]
    MinLabelsOutOfRange { value: usize, max: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Endpoint returning the latest draw labels as a JSON array, newest first.
    pub feed_url: String,
    /// Collector base URL; the outcome value is appended to it.
    pub collector_url: String,
    pub user_agent: String,
    /// Connect/read/write timeout for every HTTP request.
    pub http_timeout_secs: u64,
    /// Reads keeping fewer labels than this are treated as empty.
    pub min_labels: usize,
    pub watch: WatchCfg,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            feed_url: String::new(),
            collector_url: String::new(),
            user_agent: concat!("draw_watch/", env!("CARGO_PKG_VERSION")).to_string(),
            http_timeout_secs: 5,
            min_labels: LabelRules::default().min_genuine,
            watch: WatchCfg::default(),
        }
    }
}

impl DaemonConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Some(text)
            }
            None => None,
        };
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from optional file contents plus an env lookup. Validates the result.
    pub fn from_sources<F>(file: Option<&str>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match file {
            Some(text) => serde_json::from_str::<DaemonConfig>(text)?,
            None => DaemonConfig::default(),
        };

        if let Some(url) = env(FEED_URL_VAR) {
            cfg.feed_url = url;
        }
        if let Some(url) = env(COLLECTOR_URL_VAR) {
            cfg.collector_url = url;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("feed_url", &self.feed_url, FEED_URL_VAR)?;
        check_url("collector_url", &self.collector_url, COLLECTOR_URL_VAR)?;
        if self.watch.max_consecutive_failures == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        // A snapshot never keeps more than SNAPSHOT_WIDTH labels.
        if self.min_labels == 0 || self.min_labels > SNAPSHOT_WIDTH {
            return Err(ConfigError::MinLabelsOutOfRange {
                value: self.min_labels,
                max: SNAPSHOT_WIDTH,
            });
        }
        Ok(())
    }

    pub fn label_rules(&self) -> LabelRules {
        LabelRules {
            min_genuine: self.min_labels,
            ..LabelRules::default()
        }
    }
}

fn check_url(field: &'static str, value: &str, var: &'static str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Missing(var));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
