//! # Update Parameters
//!
//! `abi.encode(uint256 deviationThreshold, int224 deviationReference, uint32 heartbeatInterval)`,
//! exactly three words. Non-canonical padding is rejected so that one set of
//! parameters has exactly one byte representation (and one subscription id).
//!
//! Deviation references are carried as `i128`; encodings outside that range
//! are treated as invalid.

use serde::{Deserialize, Serialize};
use shared_crypto::abi::{
    i128_from_word, u256_from_word, u64_from_word, word_from_i128, word_from_u256, word_from_u64,
    WORD,
};
use shared_types::U256;

use super::errors::MarketError;

/// Encoded length.
pub const UPDATE_PARAMETERS_LENGTH: usize = 3 * WORD;

/// Decoded update parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateParameters {
    /// Deviation that triggers an update (1e8 = 100%)
    pub deviation_threshold: U256,
    /// Value deviation is measured against
    pub deviation_reference: i128,
    /// Maximum seconds between updates
    pub heartbeat_interval: u32,
}

impl UpdateParameters {
    /// Bundle the three fields.
    pub fn new(deviation_threshold: U256, deviation_reference: i128, heartbeat_interval: u32) -> Self {
        Self {
            deviation_threshold,
            deviation_reference,
            heartbeat_interval,
        }
    }

    /// Decode the canonical encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, MarketError> {
        if bytes.len() != UPDATE_PARAMETERS_LENGTH {
            return Err(MarketError::InvalidUpdateParameters);
        }
        let deviation_threshold = u256_from_word(&bytes[..WORD]);
        let deviation_reference =
            i128_from_word(&bytes[WORD..2 * WORD]).ok_or(MarketError::InvalidUpdateParameters)?;
        let heartbeat_interval = u64_from_word(&bytes[2 * WORD..])
            .and_then(|value| u32::try_from(value).ok())
            .ok_or(MarketError::InvalidUpdateParameters)?;
        Ok(Self {
            deviation_threshold,
            deviation_reference,
            heartbeat_interval,
        })
    }

    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(UPDATE_PARAMETERS_LENGTH);
        bytes.extend_from_slice(&word_from_u256(self.deviation_threshold));
        bytes.extend_from_slice(&word_from_i128(self.deviation_reference));
        bytes.extend_from_slice(&word_from_u64(u64::from(self.heartbeat_interval)));
        bytes
    }

    /// Fails unless both share a deviation reference.
    pub fn ensure_comparable(&self, other: &Self) -> Result<(), MarketError> {
        if self.deviation_reference != other.deviation_reference {
            return Err(MarketError::DeviationReferencesNotEqual);
        }
        Ok(())
    }

    /// At least as strict as `other` in both threshold and heartbeat.
    ///
    /// Only meaningful for parameters with equal deviation references.
    pub fn is_stronger_or_equal(&self, other: &Self) -> bool {
        self.deviation_threshold <= other.deviation_threshold
            && self.heartbeat_interval <= other.heartbeat_interval
    }

    /// Stronger or equal, and not equal.
    pub fn is_strictly_stronger(&self, other: &Self) -> bool {
        self.is_stronger_or_equal(other) && self != other
    }

    /// Neither dominates the other.
    pub fn is_incomparable(&self, other: &Self) -> bool {
        !self.is_stronger_or_equal(other) && !other.is_stronger_or_equal(self)
    }
}
