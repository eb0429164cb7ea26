//! # Shared Crypto
//!
//! Ethereum-compatible primitives used by the hash registry and the
//! subscription market.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | keccak-256 | Identifiers, signed-message digests |
//! | `ecdsa` | secp256k1 | Signer address recovery, test/tool signing |
//! | `merkle` | sorted-pair keccak tree | Root membership proofs |
//! | `abi` | 32-byte word encoding | Canonical leaf and blob layouts |
//!
//! ## Security Properties
//!
//! - **secp256k1**: low-S enforced on recovery (EIP-2), RFC 6979 signing
//! - **Merkle leaves** are double-hashed so that a leaf can never be confused
//!   with an internal node

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod merkle;

// Re-exports
pub use ecdsa::{address_from_verifying_key, recover_address, EcdsaSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{eth_signed_message_hash, hash_type, keccak256, keccak256_concat};
pub use merkle::{leaf_hash, verify_proof, MerkleTree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
