//! # Domain Errors
//!
//! Every variant names the precondition the call violated.

use shared_types::{ErrorKind, Hash, Timestamp};
use thiserror::Error;

/// Hash registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashRegistryError {
    /// Caller is not the registry owner.
    #[error("Sender not owner")]
    SenderNotOwner,

    /// Ownership cannot be transferred to the zero address.
    #[error("New owner zero")]
    NewOwnerZero,

    /// The zero hash type is reserved.
    #[error("Hash type zero")]
    InvalidHashType,

    /// Signer list is empty.
    #[error("Signers empty")]
    EmptySigners,

    /// First signer is the zero address.
    #[error("First signer address zero")]
    FirstSignerZero,

    /// Signers must be strictly ascending.
    #[error("Signers not in ascending order")]
    SignersNotAscending,

    /// Registered hash value is zero.
    #[error("Hash value zero")]
    HashValueZero,

    /// Attestation timestamp is later than the current time.
    #[error("Timestamp from future: {timestamp} > {now}")]
    TimestampFromFuture {
        /// Attested timestamp
        timestamp: Timestamp,
        /// Verifier time
        now: Timestamp,
    },

    /// Attestation is not newer than the stored one.
    #[error("Timestamp not more recent: {timestamp} <= {stored}")]
    TimestampNotMoreRecent {
        /// Attested timestamp
        timestamp: Timestamp,
        /// Timestamp currently stored for the hash type
        stored: Timestamp,
    },

    /// No signer set exists for the hash type.
    #[error("Signers not set for hash type {}", hex_prefix(.0))]
    SignersNotSet(Hash),

    /// One signature package per signer is required.
    #[error("Signature count mismatch: expected {expected}, got {actual}")]
    SignatureCountMismatch {
        /// Number of signers
        expected: usize,
        /// Number of packages supplied
        actual: usize,
    },

    /// Package is neither a direct (65 byte) nor a delegated (162 byte) signature.
    #[error("Invalid signature length at slot {index}: {length} bytes")]
    InvalidSignatureLength {
        /// Signer slot
        index: usize,
        /// Supplied length
        length: usize,
    },

    /// Signature does not recover to the slot's signer.
    #[error("Signature mismatch at slot {index}")]
    SignatureMismatch {
        /// Signer slot
        index: usize,
    },

    /// Delegation expired before the current time.
    #[error("Delegation ended at slot {index}: expiry {expiry}")]
    DelegationEnded {
        /// Signer slot
        index: usize,
        /// Delegation expiry
        expiry: Timestamp,
    },
}

impl HashRegistryError {
    /// Error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SenderNotOwner
            | Self::SignersNotSet(_)
            | Self::SignatureMismatch { .. }
            | Self::DelegationEnded { .. } => ErrorKind::Authorization,
            Self::TimestampNotMoreRecent { .. } => ErrorKind::StateConflict,
            Self::NewOwnerZero
            | Self::InvalidHashType
            | Self::EmptySigners
            | Self::FirstSignerZero
            | Self::SignersNotAscending
            | Self::HashValueZero
            | Self::TimestampFromFuture { .. }
            | Self::SignatureCountMismatch { .. }
            | Self::InvalidSignatureLength { .. } => ErrorKind::Validation,
        }
    }
}

fn hex_prefix(hash: &Hash) -> String {
    hash[..4].iter().map(|b| format!("{b:02x}")).collect()
}
