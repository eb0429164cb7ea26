//! # Inbound Ports
//!
//! API trait defining what the hash registry can do.

use crate::domain::{AttestedHash, HashRegistryError};
use shared_types::{Address, Hash, Timestamp};

/// Hash registry API - inbound port.
pub trait HashRegistryApi: Send + Sync {
    /// Current owner.
    fn owner(&self) -> Address;

    /// Hand ownership to `new_owner`. Owner only.
    fn transfer_ownership(&self, caller: Address, new_owner: Address)
        -> Result<(), HashRegistryError>;

    /// Replace the signer set of `hash_type`. Owner only.
    fn set_signers(
        &self,
        caller: Address,
        hash_type: Hash,
        signers: Vec<Address>,
    ) -> Result<(), HashRegistryError>;

    /// Record `value` for `hash_type` at the current time without signatures.
    /// Owner only.
    fn set_hash(&self, caller: Address, hash_type: Hash, value: Hash)
        -> Result<(), HashRegistryError>;

    /// Register a hash attested by every signer of `hash_type`.
    ///
    /// `signatures` holds one encoded package per signer, in signer order.
    fn register_hash(
        &self,
        hash_type: Hash,
        value: Hash,
        timestamp: Timestamp,
        signatures: &[Vec<u8>],
    ) -> Result<(), HashRegistryError>;

    /// Stored value, or the zero hash if never set.
    fn get_hash_value(&self, hash_type: &Hash) -> Hash;

    /// Stored value and timestamp, if any.
    fn get_hash(&self, hash_type: &Hash) -> Option<AttestedHash>;

    /// Signer set of `hash_type` (empty if unset).
    fn get_signers(&self, hash_type: &Hash) -> Vec<Address>;
}
