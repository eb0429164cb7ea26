//! In-memory collaborators.

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::DataFeedReading;
use crate::ports::{DataFeedStore, LedgerError, RoleRegistry, SponsorWalletLedger};
use shared_types::{Address, DapiName, Hash, Timestamp, U256, ZERO_HASH};

/// Data feed store backed by hash maps.
///
/// Readings are written directly with [`InMemoryDataFeedStore::update`];
/// nothing is aggregated.
#[derive(Debug, Default)]
pub struct InMemoryDataFeedStore {
    readings: RwLock<HashMap<Hash, DataFeedReading>>,
    dapi_names: RwLock<HashMap<DapiName, Hash>>,
}

impl InMemoryDataFeedStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading for a data feed or beacon.
    pub fn update(&self, data_feed_id: Hash, value: i128, timestamp: Timestamp) {
        self.readings
            .write()
            .insert(data_feed_id, DataFeedReading { value, timestamp });
    }
}

impl DataFeedStore for InMemoryDataFeedStore {
    fn read_data_feed(&self, data_feed_id: &Hash) -> DataFeedReading {
        self.readings
            .read()
            .get(data_feed_id)
            .copied()
            .unwrap_or_default()
    }

    fn dapi_name_to_data_feed_id(&self, dapi_name: &DapiName) -> Hash {
        self.dapi_names
            .read()
            .get(dapi_name)
            .copied()
            .unwrap_or(ZERO_HASH)
    }

    fn set_dapi_name(&self, dapi_name: DapiName, data_feed_id: Hash) {
        let mut names = self.dapi_names.write();
        if data_feed_id == ZERO_HASH {
            names.remove(&dapi_name);
        } else {
            names.insert(dapi_name, data_feed_id);
        }
    }
}

/// Role registry answering the same for every dAPI name.
#[derive(Debug)]
pub struct StaticRoleRegistry {
    granted: AtomicBool,
}

impl StaticRoleRegistry {
    /// Registry that grants (or withholds) the role.
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
        }
    }

    /// Grant or revoke the role.
    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }
}

impl Default for StaticRoleRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RoleRegistry for StaticRoleRegistry {
    fn may_set_dapi_name(&self, _dapi_name: &DapiName) -> bool {
        self.granted.load(Ordering::SeqCst)
    }
}

/// Sponsor wallet balances.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<Address, U256>>,
    rejecting: Mutex<HashSet<Address>>,
}

impl InMemoryLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add funds outside of the market (e.g. a direct top-up).
    pub fn fund(&self, wallet: Address, amount: U256) {
        let mut balances = self.balances.lock();
        let balance = balances.entry(wallet).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Remove funds spent by the wallet on updates.
    pub fn spend(&self, wallet: Address, amount: U256) {
        let mut balances = self.balances.lock();
        let balance = balances.entry(wallet).or_default();
        *balance = balance.saturating_sub(amount);
    }

    /// Make every transfer to `wallet` fail.
    pub fn reject_transfers_to(&self, wallet: Address) {
        self.rejecting.lock().insert(wallet);
    }
}

impl SponsorWalletLedger for InMemoryLedger {
    fn balance_of(&self, wallet: &Address) -> U256 {
        self.balances
            .lock()
            .get(wallet)
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&self, wallet: &Address, amount: U256) -> Result<(), LedgerError> {
        if self.rejecting.lock().contains(wallet) {
            return Err(LedgerError::Rejected("recipient rejects transfers".into()));
        }
        self.fund(*wallet, amount);
        Ok(())
    }
}
