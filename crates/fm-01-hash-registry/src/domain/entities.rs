//! # Domain Entities
//!
//! Signer sets and attested hashes, plus the registry state that owns them.

use serde::{Deserialize, Serialize};
use shared_types::{is_zero_address, is_zero_hash, Address, Hash, Timestamp, ZERO_HASH};
use std::collections::HashMap;

use super::errors::HashRegistryError;

/// Ordered signer list for one hash type.
///
/// Non-empty, strictly ascending, first entry non-zero. Ascending order also
/// rules out duplicates, so every signer occupies exactly one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet(Vec<Address>);

impl SignerSet {
    /// Validate and wrap a signer list.
    pub fn new(signers: Vec<Address>) -> Result<Self, HashRegistryError> {
        let first = signers.first().ok_or(HashRegistryError::EmptySigners)?;
        if is_zero_address(first) {
            return Err(HashRegistryError::FirstSignerZero);
        }
        if signers.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(HashRegistryError::SignersNotAscending);
        }
        Ok(Self(signers))
    }

    /// Signers in slot order.
    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A root value and the time it was attested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestedHash {
    /// Attested value
    pub value: Hash,
    /// Attestation time (seconds)
    pub timestamp: Timestamp,
}

/// Everything the registry persists.
#[derive(Debug, Default)]
pub struct RegistryState {
    /// Current owner
    pub owner: Address,
    /// Signer set per hash type
    pub signers: HashMap<Hash, SignerSet>,
    /// Latest attested hash per hash type
    pub hashes: HashMap<Hash, AttestedHash>,
}

impl RegistryState {
    /// Empty registry owned by `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Default::default()
        }
    }

    /// Stored hash, or the zero record if never set.
    pub fn hash(&self, hash_type: &Hash) -> AttestedHash {
        self.hashes.get(hash_type).copied().unwrap_or_default()
    }

    /// Stored value, or the zero hash.
    pub fn hash_value(&self, hash_type: &Hash) -> Hash {
        self.hashes
            .get(hash_type)
            .map(|h| h.value)
            .unwrap_or(ZERO_HASH)
    }

    /// Fails unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), HashRegistryError> {
        if *caller != self.owner {
            return Err(HashRegistryError::SenderNotOwner);
        }
        Ok(())
    }
}

/// Fails for the reserved zero hash type.
pub fn ensure_hash_type(hash_type: &Hash) -> Result<(), HashRegistryError> {
    if is_zero_hash(hash_type) {
        return Err(HashRegistryError::InvalidHashType);
    }
    Ok(())
}
