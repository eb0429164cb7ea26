//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature has the wrong number of bytes
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// r or s is not a valid scalar
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Recovery ID (v) must be 0, 1, 27 or 28
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("Signing failed")]
    SigningFailed,

    /// A Merkle tree needs at least one leaf
    #[error("Merkle tree has no leaves")]
    EmptyMerkleTree,
}
