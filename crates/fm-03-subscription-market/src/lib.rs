//! # FM-03 Subscription Market
//!
//! Sells update-parameter subscriptions for dAPI names and decides which
//! parameters each dAPI name is currently updated under.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - A bounded queue per dAPI name that only admits genuine upgrades:
//!   stronger parameters, or the same-or-weaker parameters for longer
//! - Proration of payments over non-overlapping coverage segments, so the
//!   sponsor wallet is only ever topped up by the shortfall
//! - Merkle-proof authorization of prices, dAPI name targets and signed API
//!   URLs against roots attested in the hash registry (FM-01)
//! - The queue head's parameters mirrored into the active-set registry
//!   (FM-02) that updaters read
//!
//! ## Queue Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Ordering | End timestamps strictly increase from head to tail |
//! | Strength | Each entry is strictly weaker than the one before it |
//! | Reference | All entries share one deviation reference |
//! | Capacity | At most 5 entries |
//! | Activation | A dAPI name is active exactly while its queue is non-empty |
//!
//! ## Module Structure
//!
//! ```text
//! fm-03-subscription-market/
//! ├── domain/          # UpdateParameters, Subscription, SubscriptionQueue, proration, leaves
//! ├── ports/           # SubscriptionMarketApi, RootProvider, DataFeedStore, ...
//! ├── adapters/        # Hash registry root provider, in-memory collaborators
//! ├── config.rs        # MarketConfig
//! ├── events.rs        # MarketEvent
//! └── service.rs       # SubscriptionMarketService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryDataFeedStore, InMemoryLedger, StaticRoleRegistry};
pub use config::{ConfigError, MarketConfig};
pub use domain::{
    daily_price, dapi_management_leaf, dapi_pricing_leaf, expected_balance, signed_api_url_leaf,
    subscription_id, ActiveDataFeed, BuySubscriptionRequest, DapiData, DataFeedData,
    DataFeedReading, MarketError, PurchaseReceipt, RootKind, RootProof, Subscription,
    SubscriptionQueue, UpdateParameters, UPDATE_PARAMETERS_LENGTH,
};
pub use events::MarketEvent;
pub use ports::{
    DataFeedStore, LedgerError, RoleRegistry, RootProvider, SponsorWalletLedger,
    SubscriptionMarketApi,
};
pub use service::{MarketDependencies, SubscriptionMarketService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
