use std::process::ExitCode;
use std::time::Duration;

use draw_watch_daemon::{build_agent, DaemonConfig, HttpNotifier, JsonFeedSource};
use draw_watch_supervisor::WatchSupervisor;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler only a restart failure can stop us.
        warn!(error = %e, "cannot listen for interrupt");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cfg = match DaemonConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let agent = build_agent(Duration::from_secs(cfg.http_timeout_secs), &cfg.user_agent);
    let source = JsonFeedSource::new(agent.clone(), cfg.feed_url.clone(), cfg.label_rules());
    let notifier = HttpNotifier::new(agent, cfg.collector_url.clone());

    info!(feed = %cfg.feed_url, collector = %cfg.collector_url, "starting draw watch");
    let mut supervisor = WatchSupervisor::new(cfg.watch.clone(), source, notifier);

    match supervisor.run(interrupted()).await {
        Ok(reason) => {
            info!(?reason, stats = ?supervisor.stats(), "stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, stats = ?supervisor.stats(), "giving up");
            ExitCode::FAILURE
        }
    }
}
