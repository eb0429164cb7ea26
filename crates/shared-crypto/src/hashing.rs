//! # Keccak-256 Hashing
//!
//! All identifiers, digests and Merkle nodes in this workspace are keccak-256.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Prefix applied by `eth_sign` / `personal_sign` to a 32-byte message.
const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 of the concatenation of `parts` (`abi.encodePacked` style).
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Digest a signer actually signs when signing `hash` with `personal_sign`.
pub fn eth_signed_message_hash(hash: &Hash) -> Hash {
    keccak256_concat(&[ETH_SIGNED_MESSAGE_PREFIX, hash])
}

/// Hash type identifier derived from a human-readable label.
pub fn hash_type(label: &str) -> Hash {
    keccak256(label.as_bytes())
}
