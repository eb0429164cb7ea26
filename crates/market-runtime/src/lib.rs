//! # Market Runtime Library
//!
//! Wires the hash registry (FM-01), the active-set registry (FM-02) and the
//! subscription market (FM-03) with in-memory collaborators, and runs the
//! keeper that retires ended subscriptions. The `market-runtime` binary is a
//! thin wrapper around [`MarketRuntime`].
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `FM_CONFIG` file, environment)
//! 2. Validate it
//! 3. Wire services ([`ServiceContainer`])
//! 4. Spawn the keeper
//! 5. Wait for shutdown

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod keeper;

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub use container::{
    ConcreteHashRegistry, RuntimeConfig, RuntimeConfigError, ServiceContainer, CONFIG_PATH_ENV,
};
pub use keeper::Keeper;

/// Running services plus the keeper task.
pub struct MarketRuntime {
    container: Arc<ServiceContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    keeper: Mutex<Option<JoinHandle<()>>>,
}

impl MarketRuntime {
    /// Wire services from `config`.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeConfigError> {
        Ok(Self::from_container(ServiceContainer::new(config)?))
    }

    /// Wrap an already wired container.
    pub fn from_container(container: ServiceContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            keeper: Mutex::new(None),
        }
    }

    /// Spawn the keeper. Must be called inside a tokio runtime.
    pub fn start(&self) {
        let mut slot = self.keeper.lock();
        if slot.is_some() {
            return;
        }
        let keeper = Keeper::new(
            self.container.market.clone(),
            self.container.config.keeper_interval(),
        );
        *slot = Some(tokio::spawn(keeper.run(self.shutdown_rx.clone())));
        info!(
            "[runtime] Market runtime v{} started (chain {})",
            env!("CARGO_PKG_VERSION"),
            self.container.config.market.chain_id
        );
    }

    /// Stop the keeper and wait for it to finish its current pass.
    pub async fn shutdown(&self) {
        info!("[runtime] Initiating shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("[runtime] Failed to send shutdown signal: {}", e);
        }
        let handle = self.keeper.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("[runtime] Keeper task failed: {}", e);
            }
        }
        info!("[runtime] Shutdown complete");
    }

    /// Shared handle to the services.
    pub fn container(&self) -> Arc<ServiceContainer> {
        Arc::clone(&self.container)
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
