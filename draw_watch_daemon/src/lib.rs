//! Wiring for the `draw_watch` process: configuration and the concrete HTTP
//! feed/collector adapters.

pub mod config;
pub mod http;

pub use config::{ConfigError, DaemonConfig};
pub use http::{build_agent, labels_from_json, HttpNotifier, JsonFeedSession, JsonFeedSource};
