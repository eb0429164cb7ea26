//! # Market Runtime
//!
//! Loads configuration, installs logging, starts the keeper and waits for
//! Ctrl+C.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use market_runtime::{MarketRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::load().context("Failed to load configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let runtime = MarketRuntime::new(config).context("Failed to wire services")?;
    runtime.start();

    info!("[runtime] Running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;
    Ok(())
}
