//! Blocking `ureq` adapters, run off the async loop via `spawn_blocking`.

use std::time::Duration;

use draw_watch_core::{Outcome, Snapshot, WatchCfg};
use draw_watch_supervisor::{
    normalize_labels, AcquisitionError, FeedSession, FeedSource, LabelRules, NotifyError,
    Notifier, SampleError,
};
use serde_json::Value;
use tracing::debug;

pub fn build_agent(timeout: Duration, user_agent: &str) -> ureq::Agent {
    let timeout = timeout.max(Duration::from_millis(100));
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .user_agent(user_agent)
        .build()
}

/// Turn a feed body (`[12, "5", ...]`) into raw labels.
///
/// Strings and numbers are kept verbatim; anything else becomes its JSON text
/// so label normalization can reject it.
pub fn labels_from_json(body: &Value) -> Option<Vec<String>> {
    let items = body.as_array()?;
    Some(
        items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

enum Fetch {
    Body(Value),
    /// The feed answered, just not with anything usable.
    Unusable(String),
}

fn fetch_json(agent: &ureq::Agent, url: &str) -> Result<Fetch, String> {
    match agent.get(url).call() {
        Ok(resp) => match resp.into_json::<Value>() {
            Ok(body) => Ok(Fetch::Body(body)),
            Err(e) => Ok(Fetch::Unusable(format!("bad body: {e}"))),
        },
        Err(ureq::Error::Status(code, _)) => Ok(Fetch::Unusable(format!("status {code}"))),
        Err(ureq::Error::Transport(t)) => Err(t.to_string()),
    }
}

async fn fetch_blocking(agent: &ureq::Agent, url: &str) -> Result<Fetch, String> {
    let agent = agent.clone();
    let url = url.to_string();
    tokio::task::spawn_blocking(move || fetch_json(&agent, &url))
        .await
        .map_err(|e| format!("fetch task failed: {e}"))?
}

/// Polls a JSON endpoint that lists the latest draw labels.
pub struct JsonFeedSource {
    agent: ureq::Agent,
    url: String,
    rules: LabelRules,
}

impl JsonFeedSource {
    pub fn new(agent: ureq::Agent, url: impl Into<String>, rules: LabelRules) -> Self {
        Self {
            agent,
            url: url.into(),
            rules,
        }
    }
}

impl FeedSource for JsonFeedSource {
    type Session = JsonFeedSession;

    async fn acquire(&mut self, _cfg: &WatchCfg) -> Result<JsonFeedSession, AcquisitionError> {
        match fetch_blocking(&self.agent, &self.url).await {
            Ok(Fetch::Body(_)) => {}
            Ok(Fetch::Unusable(why)) => {
                return Err(AcquisitionError::Setup(format!("{}: {why}", self.url)))
            }
            Err(why) => return Err(AcquisitionError::Unavailable(format!("{}: {why}", self.url))),
        }
        Ok(JsonFeedSession {
            agent: self.agent.clone(),
            url: self.url.clone(),
            rules: self.rules,
            released: false,
        })
    }
}

pub struct JsonFeedSession {
    agent: ureq::Agent,
    url: String,
    rules: LabelRules,
    released: bool,
}

impl FeedSession for JsonFeedSession {
    async fn sample(&mut self) -> Result<Snapshot, SampleError> {
        if self.released {
            return Err(SampleError::SessionLost("session was released".to_string()));
        }
        match fetch_blocking(&self.agent, &self.url).await {
            Ok(Fetch::Body(body)) => match labels_from_json(&body) {
                Some(labels) => Ok(normalize_labels(&labels, &self.rules)),
                None => {
                    debug!("feed body is not an array");
                    Ok(Snapshot::degraded())
                }
            },
            Ok(Fetch::Unusable(why)) => {
                debug!(reason = %why, "feed read unusable");
                Ok(Snapshot::degraded())
            }
            Err(why) => Err(SampleError::Source(why)),
        }
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!(url = %self.url, "feed session released");
        }
    }
}

/// Sends each outcome as `GET {base_url}{value}`. No body, no retries.
pub struct HttpNotifier {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpNotifier {
    pub fn new(agent: ureq::Agent, base_url: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, outcome: Outcome) -> String {
        format!("{}{}", self.base_url, outcome)
    }
}

fn deliver(agent: &ureq::Agent, url: &str) -> Result<(), NotifyError> {
    match agent.get(url).call() {
        Ok(resp) if (200..300).contains(&resp.status()) => Ok(()),
        Ok(resp) => Err(NotifyError::Status(resp.status())),
        Err(ureq::Error::Status(code, _)) => Err(NotifyError::Status(code)),
        Err(ureq::Error::Transport(t)) => Err(NotifyError::Transport(t.to_string())),
    }
}

impl Notifier for HttpNotifier {
    async fn notify(&mut self, outcome: Outcome) -> Result<(), NotifyError> {
        let agent = self.agent.clone();
        let url = self.url_for(outcome);
        tokio::task::spawn_blocking(move || deliver(&agent, &url))
            .await
            .map_err(|e| NotifyError::Transport(format!("notify task failed: {e}")))?
    }
}
