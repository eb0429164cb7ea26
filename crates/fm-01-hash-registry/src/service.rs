//! # Hash Registry Service
//!
//! Application service implementing [`HashRegistryApi`].
//!
//! ## Registration Checks
//!
//! `register_hash` runs its checks in a fixed order and stops at the first
//! failure:
//!
//! 1. value non-zero
//! 2. timestamp not in the future
//! 3. timestamp newer than the stored one
//! 4. a signer set exists
//! 5. one package per signer
//! 6. per slot, in signer order: decode, expiry, recovery
//!
//! Nothing is written until every slot has verified.
//!
//! ## Thread Safety
//!
//! State lives behind a `parking_lot::RwLock`. Each mutating call holds the
//! write guard from its first check to its last write, so a concurrent
//! registration cannot slip between verification and commit.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{
    delegation_digest, ensure_hash_type, payload_digest, AttestedHash, HashRegistryError,
    RegistryState, SignaturePackage, SignerSet,
};
use crate::events::HashRegistryEvent;
use crate::ports::{HashRegistryApi, SignatureRecovery};
use shared_types::{
    is_zero_address, is_zero_hash, Address, EventSink, Hash, TimeSource, Timestamp,
};

/// Hash Registry Service.
pub struct HashRegistryService<R: SignatureRecovery> {
    state: RwLock<RegistryState>,
    recovery: Arc<R>,
    events: Arc<dyn EventSink<HashRegistryEvent>>,
    clock: Arc<dyn TimeSource>,
}

impl<R: SignatureRecovery> HashRegistryService<R> {
    /// Create a registry owned by `owner`.
    pub fn new(
        owner: Address,
        recovery: Arc<R>,
        events: Arc<dyn EventSink<HashRegistryEvent>>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        info!("[fm-01] Hash registry created");
        Self {
            state: RwLock::new(RegistryState::new(owner)),
            recovery,
            events,
            clock,
        }
    }

    fn verify_slot(
        &self,
        index: usize,
        package: &[u8],
        signer: &Address,
        payload: &Hash,
        now: Timestamp,
    ) -> Result<(), HashRegistryError> {
        let package = SignaturePackage::decode(package).map_err(|e| {
            HashRegistryError::InvalidSignatureLength {
                index,
                length: e.0,
            }
        })?;
        let mismatch = || HashRegistryError::SignatureMismatch { index };

        match package {
            SignaturePackage::Direct(signature) => {
                let recovered = self
                    .recovery
                    .recover(payload, &signature)
                    .map_err(|_| mismatch())?;
                if recovered != *signer {
                    return Err(mismatch());
                }
            }
            SignaturePackage::Delegated {
                expiry,
                delegation_signature,
                delegate_signature,
            } => {
                if expiry < now {
                    return Err(HashRegistryError::DelegationEnded { index, expiry });
                }
                let delegate = self
                    .recovery
                    .recover(payload, &delegate_signature)
                    .map_err(|_| mismatch())?;
                let delegator = self
                    .recovery
                    .recover(&delegation_digest(&delegate, expiry), &delegation_signature)
                    .map_err(|_| mismatch())?;
                if delegator != *signer {
                    return Err(mismatch());
                }
                debug!("[fm-01] Slot {} signed by delegate until {}", index, expiry);
            }
        }
        Ok(())
    }
}

impl<R: SignatureRecovery> HashRegistryApi for HashRegistryService<R> {
    fn owner(&self) -> Address {
        self.state.read().owner
    }

    fn transfer_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), HashRegistryError> {
        let mut state = self.state.write();
        state.ensure_owner(&caller)?;
        if is_zero_address(&new_owner) {
            return Err(HashRegistryError::NewOwnerZero);
        }
        let previous_owner = std::mem::replace(&mut state.owner, new_owner);
        drop(state);

        info!("[fm-01] Ownership transferred");
        self.events.publish(HashRegistryEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    fn set_signers(
        &self,
        caller: Address,
        hash_type: Hash,
        signers: Vec<Address>,
    ) -> Result<(), HashRegistryError> {
        let mut state = self.state.write();
        state.ensure_owner(&caller)?;
        ensure_hash_type(&hash_type)?;
        let set = SignerSet::new(signers)?;
        let signers = set.as_slice().to_vec();
        state.signers.insert(hash_type, set);
        drop(state);

        info!("[fm-01] Signer set replaced ({} signers)", signers.len());
        self.events
            .publish(HashRegistryEvent::SignersSet { hash_type, signers });
        Ok(())
    }

    fn set_hash(
        &self,
        caller: Address,
        hash_type: Hash,
        value: Hash,
    ) -> Result<(), HashRegistryError> {
        let timestamp = self.clock.now();
        let mut state = self.state.write();
        state.ensure_owner(&caller)?;
        state
            .hashes
            .insert(hash_type, AttestedHash { value, timestamp });
        drop(state);

        info!("[fm-01] Hash set by owner at {}", timestamp);
        self.events.publish(HashRegistryEvent::HashSet {
            hash_type,
            value,
            timestamp,
        });
        Ok(())
    }

    fn register_hash(
        &self,
        hash_type: Hash,
        value: Hash,
        timestamp: Timestamp,
        signatures: &[Vec<u8>],
    ) -> Result<(), HashRegistryError> {
        let now = self.clock.now();
        let mut state = self.state.write();

        if is_zero_hash(&value) {
            return Err(HashRegistryError::HashValueZero);
        }
        if timestamp > now {
            return Err(HashRegistryError::TimestampFromFuture { timestamp, now });
        }
        let stored = state.hash(&hash_type).timestamp;
        if timestamp <= stored {
            return Err(HashRegistryError::TimestampNotMoreRecent { timestamp, stored });
        }
        let signers = state
            .signers
            .get(&hash_type)
            .ok_or(HashRegistryError::SignersNotSet(hash_type))?
            .as_slice()
            .to_vec();
        if signatures.len() != signers.len() {
            return Err(HashRegistryError::SignatureCountMismatch {
                expected: signers.len(),
                actual: signatures.len(),
            });
        }

        let payload = payload_digest(&hash_type, &value, timestamp);
        for (index, (package, signer)) in signatures.iter().zip(&signers).enumerate() {
            if let Err(e) = self.verify_slot(index, package, signer, &payload, now) {
                warn!("[fm-01] Registration rejected: {}", e);
                return Err(e);
            }
        }

        state
            .hashes
            .insert(hash_type, AttestedHash { value, timestamp });
        drop(state);

        info!(
            "[fm-01] Hash registered at {} with {} signatures",
            timestamp,
            signers.len()
        );
        self.events.publish(HashRegistryEvent::HashRegistered {
            hash_type,
            value,
            timestamp,
            signers,
        });
        Ok(())
    }

    fn get_hash_value(&self, hash_type: &Hash) -> Hash {
        self.state.read().hash_value(hash_type)
    }

    fn get_hash(&self, hash_type: &Hash) -> Option<AttestedHash> {
        self.state.read().hashes.get(hash_type).copied()
    }

    fn get_signers(&self, hash_type: &Hash) -> Vec<Address> {
        self.state
            .read()
            .signers
            .get(hash_type)
            .map(|set| set.as_slice().to_vec())
            .unwrap_or_default()
    }
}
