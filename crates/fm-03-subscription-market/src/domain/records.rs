//! Request, receipt and query records of the market API.

use fm_02_active_set::Subject;
use serde::{Deserialize, Serialize};
use shared_types::{Address, DapiName, Hash, Timestamp, U256};

use super::proofs::RootProof;

/// Latest value of a data feed or beacon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFeedReading {
    /// Value
    pub value: i128,
    /// Time of the update that produced it (zero if never updated)
    pub timestamp: Timestamp,
}

/// Everything a purchase needs besides the attached payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuySubscriptionRequest {
    /// dAPI name being subscribed to
    pub dapi_name: DapiName,
    /// Data feed the dAPI name must point to
    pub data_feed_id: Hash,
    /// Wallet that funds updates
    pub sponsor_wallet: Address,
    /// Encoded update parameters
    pub update_parameters: Vec<u8>,
    /// Coverage in seconds
    pub duration: u64,
    /// Total price for `duration`
    pub price: U256,
    /// Proof of `(dapiName, dataFeedId, sponsorWallet)`
    pub dapi_management_proof: RootProof,
    /// Proof of `(dapiName, chainId, updateParameters, duration, price)`
    pub dapi_pricing_proof: RootProof,
}

/// Result of an accepted purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Subscription id
    pub subscription_id: Hash,
    /// Coverage end
    pub end_timestamp: Timestamp,
    /// Prorated daily price
    pub daily_price: U256,
    /// Amount forwarded to the sponsor wallet
    pub payment_forwarded: U256,
    /// Attached payment not needed. The market never holds funds: the
    /// caller that collected the payment returns this amount to the payer.
    pub refund: U256,
    /// True if the subscription is now the current one
    pub is_current: bool,
}

/// Snapshot of a data feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFeedData {
    /// Registered details (empty if unregistered)
    pub details: Vec<u8>,
    /// Aggregated value
    pub value: i128,
    /// Aggregated timestamp
    pub timestamp: Timestamp,
    /// Component beacon values (empty for unregistered feeds)
    pub beacon_values: Vec<i128>,
    /// Component beacon timestamps
    pub beacon_timestamps: Vec<Timestamp>,
}

/// Snapshot of a dAPI name and its queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DapiData {
    /// Data feed the name points to
    pub data_feed_id: Hash,
    /// Data feed snapshot
    pub data_feed: DataFeedData,
    /// Queued update parameters, head first
    pub update_parameters: Vec<Vec<u8>>,
    /// Queued end timestamps
    pub end_timestamps: Vec<Timestamp>,
    /// Queued daily prices
    pub daily_prices: Vec<U256>,
}

/// Everything an updater needs about one active subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDataFeed {
    /// Active subject
    pub subject: Subject,
    /// Resolved data feed id (zero for an unset dAPI name)
    pub data_feed_id: Hash,
    /// Registered details
    pub details: Vec<u8>,
    /// Latest reading
    pub reading: DataFeedReading,
    /// Update parameters to enforce
    pub update_parameters: Vec<u8>,
    /// Signed API URL per component beacon's airnode
    pub signed_api_urls: Vec<String>,
}
