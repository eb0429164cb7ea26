//! # Market Events

use shared_types::{Address, DapiName, Hash, U256};

/// Events emitted by the subscription market.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarketEvent {
    /// A subscription was bought.
    BoughtSubscription {
        /// dAPI name
        dapi_name: DapiName,
        /// Subscription id
        subscription_id: Hash,
        /// Data feed the name points to
        data_feed_id: Hash,
        /// Funded wallet
        sponsor_wallet: Address,
        /// Encoded update parameters
        update_parameters: Vec<u8>,
        /// Coverage in seconds
        duration: u64,
        /// Total price
        price: U256,
        /// Amount forwarded to the sponsor wallet
        payment_amount: U256,
    },
    /// The current subscription of a dAPI name changed (zero id: none left).
    UpdatedCurrentSubscriptionId {
        /// dAPI name
        dapi_name: DapiName,
        /// New current subscription
        subscription_id: Hash,
    },
    /// A dAPI name was re-pointed.
    UpdatedDapiName {
        /// dAPI name
        dapi_name: DapiName,
        /// New data feed (zero when cleared)
        data_feed_id: Hash,
        /// Sponsor wallet listed with it
        sponsor_wallet: Address,
    },
}
