//! # Outbound Ports
//!
//! Collaborators the market consumes but does not own.

use crate::domain::DataFeedReading;
use shared_types::{Address, DapiName, Hash, U256};
use thiserror::Error;

/// Source of attested roots (the hash registry).
pub trait RootProvider: Send + Sync {
    /// Registered value for `hash_type`, zero if none.
    fn hash_value(&self, hash_type: &Hash) -> Hash;
}

/// Store holding feed readings and the dAPI name mapping.
pub trait DataFeedStore: Send + Sync {
    /// Latest reading of a data feed or beacon.
    fn read_data_feed(&self, data_feed_id: &Hash) -> DataFeedReading;

    /// Data feed a dAPI name currently points to (zero if unset).
    fn dapi_name_to_data_feed_id(&self, dapi_name: &DapiName) -> Hash;

    /// Point a dAPI name at a data feed (zero to clear).
    fn set_dapi_name(&self, dapi_name: DapiName, data_feed_id: Hash);
}

/// Access control the market must hold to re-point dAPI names.
pub trait RoleRegistry: Send + Sync {
    /// True if the market may set `dapi_name`.
    fn may_set_dapi_name(&self, dapi_name: &DapiName) -> bool;
}

/// Ledger error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Recipient refused the transfer.
    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Balances of sponsor wallets.
pub trait SponsorWalletLedger: Send + Sync {
    /// Current balance.
    fn balance_of(&self, wallet: &Address) -> U256;

    /// Credit `amount` to `wallet`.
    fn transfer(&self, wallet: &Address, amount: U256) -> Result<(), LedgerError>;
}
