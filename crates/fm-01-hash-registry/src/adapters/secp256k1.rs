//! secp256k1 recovery backed by `k256` (via `shared-crypto`).

use crate::ports::SignatureRecovery;
use shared_crypto::{recover_address, CryptoError, EcdsaSignature};
use shared_types::{Address, Hash};

/// Default [`SignatureRecovery`]: Ethereum address recovery, low-S only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignatureRecovery for Secp256k1Recovery {
    fn recover(&self, digest: &Hash, signature: &EcdsaSignature) -> Result<Address, CryptoError> {
        recover_address(digest, signature)
    }
}
