//! # FM-01 Hash Registry
//!
//! Stores, per hash type, the latest attested 32-byte root and the ordered
//! signer set allowed to attest it.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every mutation of the subscription market is authorized by a Merkle proof
//! against a root held here. A root is accepted when:
//! - the owner writes it directly (`set_hash`), or
//! - every signer of the hash type signs it (`register_hash`), each either
//!   directly or through a time-bound delegation.
//!
//! ## Security Properties
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Unanimity | One valid package per signer, in signer order |
//! | Freshness | Attestations must be newer than the stored one and not from the future |
//! | Delegation expiry | Grants are valid through their expiry second only |
//! | EIP-2 | High-S signatures never recover |
//!
//! ## Module Structure
//!
//! ```text
//! fm-01-hash-registry/
//! ├── domain/          # SignerSet, AttestedHash, SignaturePackage, errors
//! ├── ports/           # HashRegistryApi, SignatureRecovery
//! ├── adapters/        # k256-backed recovery
//! ├── events.rs        # HashRegistryEvent
//! └── service.rs       # HashRegistryService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::Secp256k1Recovery;
pub use domain::{
    delegation_digest, delegation_hash_type, payload_digest, sign_delegated, sign_delegation,
    sign_direct, AttestedHash, HashRegistryError, SignaturePackage, SignerSet,
};
pub use events::HashRegistryEvent;
pub use ports::{HashRegistryApi, SignatureRecovery};
pub use service::HashRegistryService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
