//! # Keeper
//!
//! Retires ended subscriptions so that updaters always read the parameters
//! of a subscription that is still paid for.
//!
//! Each pass asks the market which dAPI names have an ended head and calls
//! `update_current_subscription_id` for each. A failure on one name is logged
//! and does not stop the pass.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use fm_03_subscription_market::SubscriptionMarketApi;

/// Periodic subscription retirement.
pub struct Keeper {
    market: Arc<dyn SubscriptionMarketApi>,
    interval: Duration,
}

impl Keeper {
    /// Keeper running every `interval`.
    pub fn new(market: Arc<dyn SubscriptionMarketApi>, interval: Duration) -> Self {
        Self { market, interval }
    }

    /// One pass. Returns the number of dAPI names advanced.
    pub fn run_once(&self) -> usize {
        let mut advanced = 0;
        for dapi_name in self.market.dapi_names_due_for_update() {
            match self.market.update_current_subscription_id(&dapi_name) {
                Ok(()) => advanced += 1,
                Err(e) => warn!("[runtime] Keeper could not advance {}: {}", dapi_name, e),
            }
        }
        if advanced > 0 {
            info!("[runtime] Keeper advanced {} dAPI name(s)", advanced);
        }
        advanced
    }

    /// Run passes until `shutdown` flips to true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        info!("[runtime] Keeper started ({:?} interval)", self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let advanced = self.run_once();
                    debug!("[runtime] Keeper pass done ({} advanced)", advanced);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[runtime] Keeper stopping");
                        break;
                    }
                }
            }
        }
    }
}
