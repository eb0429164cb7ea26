//! # Hash Registry Events
//!
//! Published through `shared_types::EventSink` after a mutation commits.

use shared_types::{Address, Hash, Timestamp};

/// Events emitted by the hash registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashRegistryEvent {
    /// Owner replaced the signer set of a hash type.
    SignersSet {
        /// Hash type
        hash_type: Hash,
        /// New signer set
        signers: Vec<Address>,
    },
    /// Owner wrote a hash directly.
    HashSet {
        /// Hash type
        hash_type: Hash,
        /// Value
        value: Hash,
        /// Time of the write
        timestamp: Timestamp,
    },
    /// A quorum-signed hash was registered.
    HashRegistered {
        /// Hash type
        hash_type: Hash,
        /// Value
        value: Hash,
        /// Attested timestamp
        timestamp: Timestamp,
        /// Signer set that attested it
        signers: Vec<Address>,
    },
    /// Ownership moved.
    OwnershipTransferred {
        /// Old owner
        previous_owner: Address,
        /// New owner
        new_owner: Address,
    },
}
