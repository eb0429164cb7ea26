//! # Outbound Ports
//!
//! Signature recovery is the only capability the registry needs from outside
//! its domain.

use shared_crypto::{CryptoError, EcdsaSignature};
use shared_types::{Address, Hash};

/// Recovers the signing address of a prehashed digest.
///
/// Implementations must reject malleable (high-S) signatures so that one
/// signer cannot produce two distinct valid packages for the same slot.
pub trait SignatureRecovery: Send + Sync {
    /// Recover the address that signed `digest`.
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Result<Address, CryptoError>;
}
