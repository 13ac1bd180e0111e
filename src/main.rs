//! POLYARB — Polymarket complementary-outcome arbitrage detector
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the Gamma feed client, and serves the dashboard until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use polyarb::config::{self, AppConfig};
use polyarb::dashboard::{self, DashboardState};
use polyarb::feed::gamma::GammaClient;
use polyarb::feed::MarketFeed;

const BANNER: &str = r#"
 ____   ___  _  __   __ _    ____  ____
|  _ \ / _ \| | \ \ / // \  |  _ \| __ )
| |_) | | | | |  \ V // _ \ | |_) |  _ \
|  __/| |_| | |___| |/ ___ \|  _ <| |_) |
|_|    \___/|_____|_/_/   \_\_| \_\____/

  Complementary-outcome arbitrage detector
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("POLYARB_CONFIG")
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = AppConfig::load_or_default(&config_path)?;
    cfg.apply_env_overrides()?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        bind = %cfg.bind_addr(),
        feed_url = %cfg.feed.base_url,
        refresh_secs = cfg.dashboard.refresh_secs,
        "POLYARB starting up"
    );

    let feed = GammaClient::new(&cfg.feed)?;
    info!(feed = feed.name(), "Market feed ready");

    let state = Arc::new(DashboardState::new(Arc::new(feed), cfg.dashboard.refresh_secs));

    dashboard::serve(state, &cfg.bind_addr(), shutdown_signal()).await?;

    info!("POLYARB shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received."),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C; shutting down"),
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("polyarb=info"));

    let json_logging = std::env::var("POLYARB_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
