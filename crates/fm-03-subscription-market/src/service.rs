//! # Subscription Market Service
//!
//! Application service implementing [`SubscriptionMarketApi`].
//!
//! ## Purchase Flow
//!
//! ```text
//! validate ─► proofs ─► readiness ─► plan queue ─► payment ─► role ─► transfer ─► commit
//!                                    (pure)                            │
//!                                                                      └─ nothing above
//!                                                                         this line writes
//! ```
//!
//! Every check runs before the sponsor wallet is paid. Once the transfer has
//! gone through, the commit only touches in-memory state that was validated
//! by the planning step.
//!
//! ## Thread Safety
//!
//! Queues, recorded subscription parameters and the active-set registry share
//! one `parking_lot::RwLock`. A purchase holds the write guard from readiness
//! check to commit, so two purchases for the same dAPI name cannot plan
//! against the same queue.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::MarketConfig;
use crate::domain::{
    daily_price, dapi_management_leaf, dapi_pricing_leaf, expected_balance,
    signed_api_url_leaf, ActiveDataFeed, BuySubscriptionRequest, DapiData, DataFeedData,
    DataFeedReading, MarketError, PurchaseReceipt, RootKind, RootProof, Subscription,
    SubscriptionQueue, UpdateParameters,
};
use crate::events::MarketEvent;
use crate::ports::{
    DataFeedStore, RoleRegistry, RootProvider, SponsorWalletLedger, SubscriptionMarketApi,
};
use fm_02_active_set::{
    ActiveSetApi, ActiveSetEvent, ActiveSetRegistry, DataFeedDetails, Subject,
};
use shared_types::{
    is_zero_address, is_zero_hash, Address, DapiName, EventSink, Hash, TimeSource, Timestamp,
    U256, ZERO_HASH,
};

/// Collaborators of [`SubscriptionMarketService`].
pub struct MarketDependencies {
    /// Attested Merkle roots
    pub roots: Arc<dyn RootProvider>,
    /// Feed readings and dAPI name mapping
    pub data_feeds: Arc<dyn DataFeedStore>,
    /// Permission to re-point dAPI names
    pub roles: Arc<dyn RoleRegistry>,
    /// Sponsor wallet balances
    pub ledger: Arc<dyn SponsorWalletLedger>,
    /// Market events
    pub events: Arc<dyn EventSink<MarketEvent>>,
    /// Events of the embedded active-set registry
    pub registry_events: Arc<dyn EventSink<ActiveSetEvent>>,
    /// Current time
    pub clock: Arc<dyn TimeSource>,
}

struct MarketState {
    registry: ActiveSetRegistry,
    queues: HashMap<DapiName, SubscriptionQueue>,
    subscription_parameters: HashMap<Hash, Vec<u8>>,
}

/// Subscription Market Service.
pub struct SubscriptionMarketService {
    config: MarketConfig,
    state: RwLock<MarketState>,
    roots: Arc<dyn RootProvider>,
    data_feeds: Arc<dyn DataFeedStore>,
    roles: Arc<dyn RoleRegistry>,
    ledger: Arc<dyn SponsorWalletLedger>,
    events: Arc<dyn EventSink<MarketEvent>>,
    clock: Arc<dyn TimeSource>,
}

impl SubscriptionMarketService {
    /// Create a market with an empty active-set registry.
    pub fn new(deps: MarketDependencies, config: MarketConfig) -> Self {
        info!("[fm-03] Subscription market created for chain {}", config.chain_id);
        Self {
            state: RwLock::new(MarketState {
                registry: ActiveSetRegistry::new(deps.registry_events),
                queues: HashMap::new(),
                subscription_parameters: HashMap::new(),
            }),
            config,
            roots: deps.roots,
            data_feeds: deps.data_feeds,
            roles: deps.roles,
            ledger: deps.ledger,
            events: deps.events,
            clock: deps.clock,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    fn verify(
        &self,
        kind: RootKind,
        proof: &RootProof,
        leaf: &Hash,
    ) -> Result<(), MarketError> {
        let hash_type = match kind {
            RootKind::DapiManagement => self.config.dapi_management_hash_type(),
            RootKind::DapiPricing => self.config.dapi_pricing_hash_type(),
            RootKind::SignedApiUrl => self.config.signed_api_url_hash_type(),
        };
        proof.verify(kind, &self.roots.hash_value(&hash_type), leaf)
    }

    fn ensure_ready(
        &self,
        registry: &ActiveSetRegistry,
        data_feed_id: &Hash,
        now: Timestamp,
    ) -> Result<(), MarketError> {
        if !registry.data_feed_is_registered(data_feed_id) {
            return Err(MarketError::DataFeedNotRegistered);
        }
        let reading = self.data_feeds.read_data_feed(data_feed_id);
        let fresh_until = reading
            .timestamp
            .saturating_add(self.config.maximum_update_age_secs);
        if fresh_until < now {
            return Err(MarketError::DataFeedValueStale {
                timestamp: reading.timestamp,
                now,
            });
        }
        Ok(())
    }

    fn data_feed_data(&self, registry: &ActiveSetRegistry, data_feed_id: &Hash) -> DataFeedData {
        let reading = self.data_feeds.read_data_feed(data_feed_id);
        let mut data = DataFeedData {
            details: registry.data_feed_details(data_feed_id).unwrap_or_default(),
            value: reading.value,
            timestamp: reading.timestamp,
            ..Default::default()
        };
        // Component readings are only listed for beacon sets
        if let Some(DataFeedDetails::BeaconSet(beacons)) =
            registry.decoded_data_feed_details(data_feed_id)
        {
            for beacon in &beacons {
                let component = self.data_feeds.read_data_feed(&beacon.id());
                data.beacon_values.push(component.value);
                data.beacon_timestamps.push(component.timestamp);
            }
        }
        data
    }

    fn candidate(
        dapi_name: &DapiName,
        update_parameters: &[u8],
        duration: u64,
        price: U256,
        now: Timestamp,
    ) -> Result<Subscription, MarketError> {
        let parameters = UpdateParameters::decode(update_parameters)?;
        if duration == 0 {
            return Err(MarketError::DurationZero);
        }
        if price.is_zero() {
            return Err(MarketError::PriceZero);
        }
        let end_timestamp = now
            .checked_add(duration)
            .ok_or(MarketError::TimestampOverflow)?;
        let daily_price = daily_price(price, duration)?;
        Ok(Subscription::new(dapi_name, parameters, end_timestamp, daily_price))
    }
}

/// Push the head's parameters to the registry and keep activation in step
/// with the queue.
fn sync_registry(
    registry: &mut ActiveSetRegistry,
    dapi_name: DapiName,
    queue: &SubscriptionQueue,
) -> Result<(), MarketError> {
    let subject = Subject::DapiName(dapi_name);
    match queue.head() {
        Some(head) => {
            if registry.update_parameters(&subject) != head.update_parameters {
                registry.set_update_parameters(subject, &head.update_parameters)?;
            }
            registry.activate(subject)?;
        }
        None => registry.deactivate(subject)?,
    }
    Ok(())
}

impl SubscriptionMarketApi for SubscriptionMarketService {
    fn buy_subscription(
        &self,
        request: BuySubscriptionRequest,
        payment: U256,
    ) -> Result<PurchaseReceipt, MarketError> {
        let now = self.clock.now();
        let BuySubscriptionRequest {
            dapi_name,
            data_feed_id,
            sponsor_wallet,
            update_parameters,
            duration,
            price,
            dapi_management_proof,
            dapi_pricing_proof,
        } = request;

        if dapi_name.is_zero() {
            return Err(MarketError::DapiNameZero);
        }
        if is_zero_hash(&data_feed_id) {
            return Err(MarketError::DataFeedIdZero);
        }
        if is_zero_address(&sponsor_wallet) {
            return Err(MarketError::SponsorWalletZero);
        }
        let candidate = Self::candidate(&dapi_name, &update_parameters, duration, price, now)?;

        self.verify(
            RootKind::DapiManagement,
            &dapi_management_proof,
            &dapi_management_leaf(&dapi_name, &data_feed_id, &sponsor_wallet),
        )?;
        self.verify(
            RootKind::DapiPricing,
            &dapi_pricing_proof,
            &dapi_pricing_leaf(
                &dapi_name,
                self.config.chain_id,
                &update_parameters,
                duration,
                price,
            ),
        )?;

        let mut state = self.state.write();
        self.ensure_ready(&state.registry, &data_feed_id, now)?;

        let previous_head = state
            .queues
            .get(&dapi_name)
            .and_then(|queue| queue.head())
            .map(|head| head.id);
        let planned = state
            .queues
            .get(&dapi_name)
            .cloned()
            .unwrap_or_default()
            .plan_insertion(&candidate, now)?;

        let required = expected_balance(planned.entries(), now)
            .saturating_sub(self.ledger.balance_of(&sponsor_wallet));
        if payment < required {
            return Err(MarketError::InsufficientPayment {
                required,
                attached: payment,
            });
        }

        let repoint = self.data_feeds.dapi_name_to_data_feed_id(&dapi_name) != data_feed_id;
        if repoint && !self.roles.may_set_dapi_name(&dapi_name) {
            return Err(MarketError::SenderCannotSetAliasName);
        }

        if !required.is_zero() {
            self.ledger
                .transfer(&sponsor_wallet, required)
                .map_err(|e| {
                    warn!("[fm-03] Payment to sponsor wallet failed: {}", e);
                    MarketError::TransferUnsuccessful(e.to_string())
                })?;
        }

        // Commit
        if repoint {
            self.data_feeds.set_dapi_name(dapi_name, data_feed_id);
            debug!("[fm-03] {} now points to the purchased data feed", dapi_name);
        }
        let new_head = planned.head().map(|head| head.id).unwrap_or(ZERO_HASH);
        sync_registry(&mut state.registry, dapi_name, &planned)?;
        state.queues.insert(dapi_name, planned);
        state
            .subscription_parameters
            .insert(candidate.id, update_parameters.clone());
        drop(state);

        info!(
            "[fm-03] Subscription bought for {} until {} ({} forwarded)",
            dapi_name, candidate.end_timestamp, required
        );
        self.events.publish(MarketEvent::BoughtSubscription {
            dapi_name,
            subscription_id: candidate.id,
            data_feed_id,
            sponsor_wallet,
            update_parameters,
            duration,
            price,
            payment_amount: required,
        });
        if previous_head != Some(new_head) {
            self.events.publish(MarketEvent::UpdatedCurrentSubscriptionId {
                dapi_name,
                subscription_id: new_head,
            });
        }

        Ok(PurchaseReceipt {
            subscription_id: candidate.id,
            end_timestamp: candidate.end_timestamp,
            daily_price: candidate.daily_price,
            payment_forwarded: required,
            refund: payment - required,
            is_current: new_head == candidate.id,
        })
    }

    fn update_current_subscription_id(&self, dapi_name: &DapiName) -> Result<(), MarketError> {
        let now = self.clock.now();
        let mut state = self.state.write();
        let mut queue = state
            .queues
            .get(dapi_name)
            .cloned()
            .ok_or(MarketError::SubscriptionQueueEmpty)?;
        let removed = queue.advance(now)?;

        sync_registry(&mut state.registry, *dapi_name, &queue)?;
        let subscription_id = queue.head().map(|head| head.id).unwrap_or(ZERO_HASH);
        if queue.is_empty() {
            state.queues.remove(dapi_name);
        } else {
            state.queues.insert(*dapi_name, queue);
        }
        drop(state);

        info!(
            "[fm-03] {}: {} ended subscription(s) retired",
            dapi_name, removed
        );
        self.events.publish(MarketEvent::UpdatedCurrentSubscriptionId {
            dapi_name: *dapi_name,
            subscription_id,
        });
        Ok(())
    }

    fn update_dapi_name(
        &self,
        dapi_name: DapiName,
        data_feed_id: Hash,
        sponsor_wallet: Address,
        proof: RootProof,
    ) -> Result<(), MarketError> {
        let now = self.clock.now();
        if dapi_name.is_zero() {
            return Err(MarketError::DapiNameZero);
        }
        let clearing = is_zero_hash(&data_feed_id);
        if !clearing && is_zero_address(&sponsor_wallet) {
            return Err(MarketError::SponsorWalletZero);
        }
        if clearing && !is_zero_address(&sponsor_wallet) {
            return Err(MarketError::SponsorWalletNotZero);
        }
        self.verify(
            RootKind::DapiManagement,
            &proof,
            &dapi_management_leaf(&dapi_name, &data_feed_id, &sponsor_wallet),
        )?;

        let state = self.state.write();
        if self.data_feeds.dapi_name_to_data_feed_id(&dapi_name) == data_feed_id {
            return Err(MarketError::DoesNotUpdateDapiName);
        }
        if !clearing {
            self.ensure_ready(&state.registry, &data_feed_id, now)?;
        }
        if !self.roles.may_set_dapi_name(&dapi_name) {
            return Err(MarketError::SenderCannotSetAliasName);
        }
        self.data_feeds.set_dapi_name(dapi_name, data_feed_id);
        drop(state);

        info!("[fm-03] dAPI name {} updated", dapi_name);
        self.events.publish(MarketEvent::UpdatedDapiName {
            dapi_name,
            data_feed_id,
            sponsor_wallet,
        });
        Ok(())
    }

    fn update_signed_api_url(
        &self,
        airnode: Address,
        url: String,
        proof: RootProof,
    ) -> Result<(), MarketError> {
        self.verify(
            RootKind::SignedApiUrl,
            &proof,
            &signed_api_url_leaf(&airnode, &url),
        )?;
        self.state.write().registry.set_signed_api_url(airnode, url)?;
        Ok(())
    }

    fn register_data_feed(&self, details: &[u8]) -> Result<Hash, MarketError> {
        Ok(self.state.write().registry.register_data_feed(details)?)
    }

    fn compute_expected_sponsor_wallet_balance(&self, dapi_name: &DapiName) -> U256 {
        self.expected_balance_at(dapi_name, self.clock.now())
    }

    fn compute_expected_sponsor_wallet_balance_after_subscription_is_added(
        &self,
        dapi_name: &DapiName,
        update_parameters: &[u8],
        duration: u64,
        price: U256,
    ) -> Result<U256, MarketError> {
        let now = self.clock.now();
        let candidate = Self::candidate(dapi_name, update_parameters, duration, price, now)?;
        let state = self.state.read();
        let planned = match state.queues.get(dapi_name) {
            Some(queue) => queue.plan_insertion(&candidate, now)?,
            None => SubscriptionQueue::new().plan_insertion(&candidate, now)?,
        };
        Ok(expected_balance(planned.entries(), now))
    }

    fn expected_balance_at(&self, dapi_name: &DapiName, at: Timestamp) -> U256 {
        self.state
            .read()
            .queues
            .get(dapi_name)
            .map(|queue| expected_balance(queue.entries(), at))
            .unwrap_or_default()
    }

    fn get_dapi_data(&self, dapi_name: &DapiName) -> DapiData {
        let state = self.state.read();
        let data_feed_id = self.data_feeds.dapi_name_to_data_feed_id(dapi_name);
        let mut data = DapiData {
            data_feed_id,
            data_feed: self.data_feed_data(&state.registry, &data_feed_id),
            ..Default::default()
        };
        if let Some(queue) = state.queues.get(dapi_name) {
            for entry in queue.entries() {
                data.update_parameters.push(entry.update_parameters.clone());
                data.end_timestamps.push(entry.end_timestamp);
                data.daily_prices.push(entry.daily_price);
            }
        }
        data
    }

    fn get_data_feed_data(&self, data_feed_id: &Hash) -> DataFeedData {
        self.data_feed_data(&self.state.read().registry, data_feed_id)
    }

    fn subscription_update_parameters(&self, subscription_id: &Hash) -> Option<Vec<u8>> {
        self.state
            .read()
            .subscription_parameters
            .get(subscription_id)
            .cloned()
    }

    fn active_data_feed_count(&self) -> usize {
        self.state.read().registry.count()
    }

    fn active_data_feed(&self, index: usize) -> Option<ActiveDataFeed> {
        let state = self.state.read();
        let active = state.registry.get(index)?;
        let data_feed_id = match active.subject {
            Subject::DataFeed(id) => id,
            Subject::DapiName(name) => self.data_feeds.dapi_name_to_data_feed_id(&name),
        };
        let reading = if is_zero_hash(&data_feed_id) {
            DataFeedReading::default()
        } else {
            self.data_feeds.read_data_feed(&data_feed_id)
        };
        let signed_api_urls = state
            .registry
            .decoded_data_feed_details(&data_feed_id)
            .map(|details| {
                details
                    .beacons()
                    .iter()
                    .map(|beacon| state.registry.signed_api_url(&beacon.airnode))
                    .collect()
            })
            .unwrap_or_default();

        Some(ActiveDataFeed {
            subject: active.subject,
            data_feed_id,
            details: state
                .registry
                .data_feed_details(&data_feed_id)
                .unwrap_or_default(),
            reading,
            update_parameters: active.update_parameters,
            signed_api_urls,
        })
    }

    fn queue(&self, dapi_name: &DapiName) -> Vec<Subscription> {
        self.state
            .read()
            .queues
            .get(dapi_name)
            .map(|queue| queue.entries().to_vec())
            .unwrap_or_default()
    }

    fn dapi_names_due_for_update(&self) -> Vec<DapiName> {
        let now = self.clock.now();
        let mut due: Vec<DapiName> = self
            .state
            .read()
            .queues
            .iter()
            .filter(|(_, queue)| queue.head().is_some_and(|head| head.has_ended(now)))
            .map(|(name, _)| *name)
            .collect();
        due.sort();
        due
    }
}
