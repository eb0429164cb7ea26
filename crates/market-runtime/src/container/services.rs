//! # Service Graph
//!
//! ```text
//! HashRegistryService ──RootProvider──► SubscriptionMarketService ──owns──► ActiveSetRegistry
//!                                          │       │        │
//!                           InMemoryDataFeedStore  │   StaticRoleRegistry
//!                                            InMemoryLedger
//! ```
//!
//! Every service publishes its events to a [`TracingSink`].

use std::sync::Arc;
use tracing::info;

use crate::container::config::{RuntimeConfig, RuntimeConfigError};
use fm_01_hash_registry::{HashRegistryService, Secp256k1Recovery};
use fm_03_subscription_market::{
    InMemoryDataFeedStore, InMemoryLedger, MarketDependencies, StaticRoleRegistry,
    SubscriptionMarketService,
};
use shared_types::{SystemTimeSource, TimeSource, TracingSink};

/// Hash registry with k256 signature recovery.
pub type ConcreteHashRegistry = HashRegistryService<Secp256k1Recovery>;

/// All services of one runtime.
pub struct ServiceContainer {
    /// Trust registry (FM-01)
    pub hash_registry: Arc<ConcreteHashRegistry>,
    /// Subscription market (FM-03, embedding FM-02)
    pub market: Arc<SubscriptionMarketService>,
    /// Feed readings and dAPI name mapping
    pub data_feeds: Arc<InMemoryDataFeedStore>,
    /// Sponsor wallet balances
    pub ledger: Arc<InMemoryLedger>,
    /// dAPI name permission
    pub roles: Arc<StaticRoleRegistry>,
    /// Configuration the services were built from
    pub config: RuntimeConfig,
}

impl ServiceContainer {
    /// Wire every service against the system clock.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeConfigError> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Wire every service against `clock`.
    pub fn with_clock(
        config: RuntimeConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, RuntimeConfigError> {
        config.validate()?;
        let owner = config.owner_address()?;

        let hash_registry = Arc::new(HashRegistryService::new(
            owner,
            Arc::new(Secp256k1Recovery),
            Arc::new(TracingSink),
            Arc::clone(&clock),
        ));
        let data_feeds = Arc::new(InMemoryDataFeedStore::new());
        let ledger = Arc::new(InMemoryLedger::new());
        let roles = Arc::new(StaticRoleRegistry::new(true));

        let market = Arc::new(SubscriptionMarketService::new(
            MarketDependencies {
                roots: hash_registry.clone(),
                data_feeds: data_feeds.clone(),
                roles: roles.clone(),
                ledger: ledger.clone(),
                events: Arc::new(TracingSink),
                registry_events: Arc::new(TracingSink),
                clock,
            },
            config.market.clone(),
        ));

        info!("[runtime] Services wired (chain {})", config.market.chain_id);
        Ok(Self {
            hash_registry,
            market,
            data_feeds,
            ledger,
            roles,
            config,
        })
    }
}
