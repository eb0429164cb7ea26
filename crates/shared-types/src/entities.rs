//! # Core Entities
//!
//! Primitive aliases and the dAPI name type.
//!
//! All identifiers follow the Ethereum conventions the signers and Merkle tree
//! builders work with: 32-byte hashes, 20-byte addresses and 256-bit amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DapiNameError;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte hash (keccak-256 throughout this workspace).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The all-zero hash. Used as "unset" by every registry.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Seconds in a day. Daily prices are expressed per this period.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Returns true if every byte of the hash is zero.
pub fn is_zero_hash(hash: &Hash) -> bool {
    hash.iter().all(|b| *b == 0)
}

/// Returns true if every byte of the address is zero.
pub fn is_zero_address(address: &Address) -> bool {
    address.iter().all(|b| *b == 0)
}

// =============================================================================
// DAPI NAME
// =============================================================================

/// Human-readable feed name packed into 32 bytes (right-padded with zeros).
///
/// Encoded the same way `formatBytes32String` does, so at most 31 bytes of
/// UTF-8 fit and the last byte is always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DapiName(pub [u8; 32]);

impl DapiName {
    /// Maximum number of name bytes.
    pub const MAX_LEN: usize = 31;

    /// Pack a string into a dAPI name.
    pub fn new(name: &str) -> Result<Self, DapiNameError> {
        if name.is_empty() {
            return Err(DapiNameError::Empty);
        }
        if name.len() > Self::MAX_LEN {
            return Err(DapiNameError::TooLong {
                length: name.len(),
                max: Self::MAX_LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self(bytes))
    }

    /// Wrap raw bytes as they appear on the wire.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw 32-byte representation.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// True for the all-zero name, which is never a valid feed name.
    pub fn is_zero(&self) -> bool {
        is_zero_hash(&self.0)
    }
}

impl fmt::Display for DapiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(32);
        write!(f, "{}", String::from_utf8_lossy(&self.0[..end]))
    }
}
