//! # Inbound Ports
//!
//! API trait defining what the subscription market can do.

use crate::domain::{
    ActiveDataFeed, BuySubscriptionRequest, DapiData, DataFeedData, MarketError, PurchaseReceipt,
    RootProof, Subscription,
};
use shared_types::{Address, DapiName, Hash, Timestamp, U256};

/// Subscription market API - inbound port.
pub trait SubscriptionMarketApi: Send + Sync {
    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Buy a subscription, attaching `payment`.
    ///
    /// Only the sponsor wallet shortfall is transferred through the
    /// [`SponsorWalletLedger`](crate::ports::SponsorWalletLedger). The rest
    /// comes back as [`PurchaseReceipt::refund`] for the caller to return.
    fn buy_subscription(
        &self,
        request: BuySubscriptionRequest,
        payment: U256,
    ) -> Result<PurchaseReceipt, MarketError>;

    /// Retire the current subscription once it has ended.
    fn update_current_subscription_id(&self, dapi_name: &DapiName) -> Result<(), MarketError>;

    /// Re-point (or clear) a dAPI name as the management root dictates.
    fn update_dapi_name(
        &self,
        dapi_name: DapiName,
        data_feed_id: Hash,
        sponsor_wallet: Address,
        proof: RootProof,
    ) -> Result<(), MarketError>;

    /// Store the signed API URL the signed API URL root lists for `airnode`.
    fn update_signed_api_url(
        &self,
        airnode: Address,
        url: String,
        proof: RootProof,
    ) -> Result<(), MarketError>;

    /// Register data feed details, returning the data feed id.
    fn register_data_feed(&self, details: &[u8]) -> Result<Hash, MarketError>;

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Balance the sponsor wallet of `dapi_name` needs right now.
    fn compute_expected_sponsor_wallet_balance(&self, dapi_name: &DapiName) -> U256;

    /// Balance needed if the given subscription were bought right now.
    fn compute_expected_sponsor_wallet_balance_after_subscription_is_added(
        &self,
        dapi_name: &DapiName,
        update_parameters: &[u8],
        duration: u64,
        price: U256,
    ) -> Result<U256, MarketError>;

    /// Balance needed at an arbitrary time `at`, for the current queue.
    fn expected_balance_at(&self, dapi_name: &DapiName, at: Timestamp) -> U256;

    /// Queue snapshot together with the data feed it points to.
    fn get_dapi_data(&self, dapi_name: &DapiName) -> DapiData;

    /// Data feed snapshot.
    fn get_data_feed_data(&self, data_feed_id: &Hash) -> DataFeedData;

    /// Parameters ever bought under `subscription_id`, even after eviction.
    fn subscription_update_parameters(&self, subscription_id: &Hash) -> Option<Vec<u8>>;

    /// Number of active data feeds and dAPI names.
    fn active_data_feed_count(&self) -> usize;

    /// Active subject at `index`, resolved for updaters.
    fn active_data_feed(&self, index: usize) -> Option<ActiveDataFeed>;

    /// Queued subscriptions of `dapi_name`, head first.
    fn queue(&self, dapi_name: &DapiName) -> Vec<Subscription>;

    /// dAPI names whose current subscription has ended.
    fn dapi_names_due_for_update(&self) -> Vec<DapiName>;
}
