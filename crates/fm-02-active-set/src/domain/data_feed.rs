//! # Data Feed Details
//!
//! A data feed is either a single beacon or a set of beacons. Details are
//! registered as bytes and decoded into [`DataFeedDetails`].
//!
//! | Variant | Layout | Length |
//! |---------|--------|--------|
//! | Beacon | `airnode word \|\| templateId` | 64 |
//! | BeaconSet | `count word \|\| (airnode word \|\| templateId) * count` | 160..=1376 |
//!
//! Ids:
//! - beacon: `keccak256(airnode(20) || templateId(32))`
//! - beacon set: `keccak256(beaconId_0 || ... || beaconId_n)`

use serde::{Deserialize, Serialize};
use shared_crypto::abi::{address_from_word, u64_from_word, word_from_address, word_from_u64, WORD};
use shared_crypto::keccak256_concat;
use shared_types::{is_zero_address, Address, Hash};

use super::errors::ActiveSetError;

/// Largest beacon set that can be registered.
pub const MAXIMUM_BEACON_COUNT_IN_SET: usize = 21;

/// Encoded size of a single beacon.
pub const BEACON_DETAILS_LENGTH: usize = 2 * WORD;

/// Smallest encoded beacon set (two beacons).
pub const MINIMUM_BEACON_SET_DETAILS_LENGTH: usize = WORD + 2 * BEACON_DETAILS_LENGTH;

/// Largest encoded beacon set.
pub const MAXIMUM_BEACON_SET_DETAILS_LENGTH: usize =
    WORD + MAXIMUM_BEACON_COUNT_IN_SET * BEACON_DETAILS_LENGTH;

/// One airnode/template pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    /// Airnode address that signs the data
    pub airnode: Address,
    /// Template the airnode serves
    pub template_id: Hash,
}

impl Beacon {
    /// Beacon id.
    pub fn id(&self) -> Hash {
        derive_beacon_id(&self.airnode, &self.template_id)
    }

    fn decode(bytes: &[u8]) -> Result<Self, ActiveSetError> {
        let airnode =
            address_from_word(&bytes[..WORD]).ok_or(ActiveSetError::MalformedDataFeedDetails)?;
        if is_zero_address(&airnode) {
            return Err(ActiveSetError::AirnodeZero);
        }
        let mut template_id = [0u8; 32];
        template_id.copy_from_slice(&bytes[WORD..BEACON_DETAILS_LENGTH]);
        Ok(Self {
            airnode,
            template_id,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&word_from_address(&self.airnode));
        out.extend_from_slice(&self.template_id);
    }
}

/// Decoded data feed details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFeedDetails {
    /// Single beacon
    Beacon(Beacon),
    /// Aggregate of 2 to 21 beacons
    BeaconSet(Vec<Beacon>),
}

impl DataFeedDetails {
    /// Decode registered bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ActiveSetError> {
        let length = bytes.len();
        if length == BEACON_DETAILS_LENGTH {
            return Beacon::decode(bytes).map(Self::Beacon);
        }
        if length < MINIMUM_BEACON_SET_DETAILS_LENGTH {
            return Err(ActiveSetError::DataFeedDetailsTooShort { length });
        }
        if length > MAXIMUM_BEACON_SET_DETAILS_LENGTH {
            return Err(ActiveSetError::DataFeedDetailsTooLong { length });
        }

        let body = &bytes[WORD..];
        if body.len() % BEACON_DETAILS_LENGTH != 0 {
            return Err(ActiveSetError::MalformedDataFeedDetails);
        }
        let count = body.len() / BEACON_DETAILS_LENGTH;
        if u64_from_word(&bytes[..WORD]) != Some(count as u64) {
            return Err(ActiveSetError::MalformedDataFeedDetails);
        }

        body.chunks(BEACON_DETAILS_LENGTH)
            .map(Beacon::decode)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::BeaconSet)
    }

    /// Canonical bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Beacon(beacon) => {
                let mut out = Vec::with_capacity(BEACON_DETAILS_LENGTH);
                beacon.encode_into(&mut out);
                out
            }
            Self::BeaconSet(beacons) => {
                let mut out = Vec::with_capacity(WORD + beacons.len() * BEACON_DETAILS_LENGTH);
                out.extend_from_slice(&word_from_u64(beacons.len() as u64));
                for beacon in beacons {
                    beacon.encode_into(&mut out);
                }
                out
            }
        }
    }

    /// Component beacons (one for a single beacon).
    pub fn beacons(&self) -> &[Beacon] {
        match self {
            Self::Beacon(beacon) => std::slice::from_ref(beacon),
            Self::BeaconSet(beacons) => beacons,
        }
    }

    /// Ids of the component beacons.
    pub fn beacon_ids(&self) -> Vec<Hash> {
        self.beacons().iter().map(Beacon::id).collect()
    }

    /// Data feed id.
    pub fn data_feed_id(&self) -> Hash {
        match self {
            Self::Beacon(beacon) => beacon.id(),
            Self::BeaconSet(_) => derive_beacon_set_id(&self.beacon_ids()),
        }
    }
}

/// `keccak256(airnode || templateId)`.
pub fn derive_beacon_id(airnode: &Address, template_id: &Hash) -> Hash {
    keccak256_concat(&[airnode, template_id])
}

/// `keccak256` of the concatenated beacon ids.
pub fn derive_beacon_set_id(beacon_ids: &[Hash]) -> Hash {
    let parts: Vec<&[u8]> = beacon_ids.iter().map(|id| id.as_slice()).collect();
    keccak256_concat(&parts)
}
