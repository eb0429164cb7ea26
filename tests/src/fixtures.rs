//! # Fixtures
//!
//! A wired marketplace driven by a manual clock, with a quorum of generated
//! signer keys and helpers to publish Merkle catalogs through `register_hash`.

use std::sync::Arc;

use fm_01_hash_registry::{
    sign_delegated, sign_delegation, sign_direct, HashRegistryApi, HashRegistryError,
};
use fm_02_active_set::{Beacon, DataFeedDetails};
use fm_03_subscription_market::{
    dapi_management_leaf, dapi_pricing_leaf, BuySubscriptionRequest, RootProof,
    SubscriptionMarketApi, UpdateParameters,
};
use market_runtime::{RuntimeConfig, ServiceContainer};
use shared_crypto::{MerkleTree, Secp256k1KeyPair};
use shared_types::{
    Address, DapiName, Hash, ManualClock, TimeSource, Timestamp, SECONDS_PER_DAY, U256,
};

/// Start of every scenario.
pub const NOW: Timestamp = 1_700_000_000;

/// One day in seconds.
pub const DAY: u64 = SECONDS_PER_DAY;

/// Hash registry owner.
pub const OWNER: Address = [0x0A; 20];

/// Airnode serving every fixture beacon.
pub const AIRNODE: Address = [0xA1; 20];

/// Parameters with the threshold given in percent (1e6 = 1%).
pub fn parameters(percent: u64, reference: i128, heartbeat: u32) -> UpdateParameters {
    UpdateParameters::new(U256::from(percent * 1_000_000), reference, heartbeat)
}

/// dAPI name from a literal.
pub fn dapi_name(name: &str) -> DapiName {
    DapiName::new(name).expect("fixture dAPI names are short")
}

/// A purchasable (parameters, duration, price) row of the pricing tree.
#[derive(Clone, Copy, Debug)]
pub struct Offer {
    /// dAPI name the price applies to
    pub dapi_name: DapiName,
    /// Parameters sold
    pub parameters: UpdateParameters,
    /// Coverage in seconds
    pub duration: u64,
    /// Total price
    pub price: U256,
}

impl Offer {
    /// Offer for `days` days.
    pub fn new(dapi_name: DapiName, parameters: UpdateParameters, days: u64, price: u64) -> Self {
        Self {
            dapi_name,
            parameters,
            duration: days * DAY,
            price: U256::from(price),
        }
    }
}

/// A `(dapiName, dataFeedId, sponsorWallet)` row of the management tree.
#[derive(Clone, Copy, Debug)]
pub struct Listing {
    /// dAPI name
    pub dapi_name: DapiName,
    /// Data feed it should point to
    pub data_feed_id: Hash,
    /// Wallet funding its updates
    pub sponsor_wallet: Address,
}

/// Published management and pricing trees.
pub struct Catalog {
    /// Management rows, in leaf order
    pub listings: Vec<Listing>,
    /// Management tree
    pub management: MerkleTree,
    /// Pricing rows, in leaf order
    pub offers: Vec<Offer>,
    /// Pricing tree
    pub pricing: MerkleTree,
}

impl Catalog {
    /// Build both trees for `chain_id`.
    pub fn new(chain_id: u64, listings: Vec<Listing>, offers: Vec<Offer>) -> Self {
        let management = MerkleTree::new(
            listings
                .iter()
                .map(|l| dapi_management_leaf(&l.dapi_name, &l.data_feed_id, &l.sponsor_wallet))
                .collect(),
        )
        .expect("catalog has listings");
        let pricing = MerkleTree::new(
            offers
                .iter()
                .map(|o| {
                    dapi_pricing_leaf(
                        &o.dapi_name,
                        chain_id,
                        &o.parameters.encode(),
                        o.duration,
                        o.price,
                    )
                })
                .collect(),
        )
        .expect("catalog has offers");
        Self {
            listings,
            management,
            offers,
            pricing,
        }
    }

    /// Proof of management row `listing`.
    pub fn management_proof(&self, listing: usize) -> RootProof {
        RootProof::new(
            self.management.root(),
            self.management.proof(listing).expect("listing exists"),
        )
    }

    /// Purchase request for `offer` under `listing`.
    pub fn request(&self, listing: usize, offer: usize) -> BuySubscriptionRequest {
        let l = self.listings[listing];
        let o = self.offers[offer];
        BuySubscriptionRequest {
            dapi_name: l.dapi_name,
            data_feed_id: l.data_feed_id,
            sponsor_wallet: l.sponsor_wallet,
            update_parameters: o.parameters.encode(),
            duration: o.duration,
            price: o.price,
            dapi_management_proof: self.management_proof(listing),
            dapi_pricing_proof: RootProof::new(
                self.pricing.root(),
                self.pricing.proof(offer).expect("offer exists"),
            ),
        }
    }
}

/// Wired services plus a signer quorum.
pub struct Marketplace {
    /// Services under test
    pub services: ServiceContainer,
    /// Scenario clock
    pub clock: Arc<ManualClock>,
    /// Signers of every root, in ascending address order
    pub signers: Vec<Secp256k1KeyPair>,
}

impl Marketplace {
    /// Marketplace whose roots are attested by `signer_count` signers.
    pub fn new(signer_count: usize) -> Self {
        let clock = Arc::new(ManualClock::new(NOW));
        let config = RuntimeConfig::default().with_owner(&OWNER);
        let services =
            ServiceContainer::with_clock(config, clock.clone()).expect("fixture config is valid");

        let mut signers: Vec<_> = (0..signer_count)
            .map(|_| Secp256k1KeyPair::generate())
            .collect();
        signers.sort_by_key(|k| k.address());
        let addresses: Vec<Address> = signers.iter().map(|k| k.address()).collect();

        let market = services.market.config().clone();
        for hash_type in [
            market.dapi_management_hash_type(),
            market.dapi_pricing_hash_type(),
            market.signed_api_url_hash_type(),
        ] {
            services
                .hash_registry
                .set_signers(OWNER, hash_type, addresses.clone())
                .expect("owner installs signers");
        }

        Self {
            services,
            clock,
            signers,
        }
    }

    /// Register a single-beacon feed with a fresh reading.
    pub fn register_feed(&self, template: u8, value: i128) -> Hash {
        let details = DataFeedDetails::Beacon(Beacon {
            airnode: AIRNODE,
            template_id: [template; 32],
        });
        let id = self
            .services
            .market
            .register_data_feed(&details.encode())
            .expect("fixture details are valid");
        self.services
            .data_feeds
            .update(id, value, self.clock.now());
        id
    }

    /// Quorum-register `value` for `hash_type`, every signer signing directly.
    pub fn attest(&self, hash_type: Hash, value: Hash) -> Result<(), HashRegistryError> {
        let timestamp = self.clock.now();
        let packages: Vec<Vec<u8>> = self
            .signers
            .iter()
            .map(|k| {
                sign_direct(k, &hash_type, &value, timestamp)
                    .expect("signing succeeds")
                    .encode()
            })
            .collect();
        self.services
            .hash_registry
            .register_hash(hash_type, value, timestamp, &packages)
    }

    /// Like [`Marketplace::attest`], but the first signer's slot is filled by
    /// `delegate` under a grant valid until `expiry`.
    pub fn attest_with_delegate(
        &self,
        hash_type: Hash,
        value: Hash,
        delegate: &Secp256k1KeyPair,
        expiry: Timestamp,
    ) -> Result<(), HashRegistryError> {
        let timestamp = self.clock.now();
        let grant = sign_delegation(&self.signers[0], &delegate.address(), expiry)
            .expect("signing succeeds");
        let mut packages = vec![
            sign_delegated(delegate, expiry, grant, &hash_type, &value, timestamp)
                .expect("signing succeeds")
                .encode(),
        ];
        packages.extend(self.signers[1..].iter().map(|k| {
            sign_direct(k, &hash_type, &value, timestamp)
                .expect("signing succeeds")
                .encode()
        }));
        self.services
            .hash_registry
            .register_hash(hash_type, value, timestamp, &packages)
    }

    /// Build a catalog for this market's chain and attest both roots.
    pub fn publish(&self, listings: Vec<Listing>, offers: Vec<Offer>) -> Catalog {
        let config = self.services.market.config().clone();
        let catalog = Catalog::new(config.chain_id, listings, offers);
        self.attest(config.dapi_management_hash_type(), catalog.management.root())
            .expect("management root attested");
        self.attest(config.dapi_pricing_hash_type(), catalog.pricing.root())
            .expect("pricing root attested");
        catalog
    }
}
