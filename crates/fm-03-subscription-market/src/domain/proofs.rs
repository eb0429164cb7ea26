//! # Merkle Authorization
//!
//! Every market mutation is authorized by a proof against a root attested in
//! the hash registry.
//!
//! | Tree | Leaf (`abi.encode`) |
//! |------|---------------------|
//! | dAPI management | `(bytes32 dapiName, bytes32 dataFeedId, address sponsorWallet)` |
//! | dAPI pricing | `(bytes32 dapiName, uint256 chainId, bytes updateParameters, uint256 duration, uint256 price)` |
//! | Signed API URL | `(address airnode, string url)` |
//!
//! Callers supply the root together with the proof. The root must be non-zero
//! and equal to the registered one before the proof is even looked at.

use serde::{Deserialize, Serialize};
use shared_crypto::abi::{encode, word_from_address, word_from_u256, word_from_u64, Token};
use shared_crypto::{leaf_hash, verify_proof};
use shared_types::{is_zero_hash, Address, DapiName, Hash, U256};
use std::fmt;

use super::errors::MarketError;

/// Which Merkle tree a proof belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootKind {
    /// Maps dAPI names to data feeds and sponsor wallets
    DapiManagement,
    /// Lists purchasable (parameters, duration, price) per dAPI name and chain
    DapiPricing,
    /// Maps airnodes to signed API URLs
    SignedApiUrl,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DapiManagement => "dAPI management",
            Self::DapiPricing => "dAPI pricing",
            Self::SignedApiUrl => "signed API URL",
        };
        f.write_str(name)
    }
}

/// Caller-supplied root and sibling path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootProof {
    /// Root the proof folds to
    pub root: Hash,
    /// Sibling hashes, leaf level first
    pub proof: Vec<Hash>,
}

impl RootProof {
    /// Bundle a root with its proof.
    pub fn new(root: Hash, proof: Vec<Hash>) -> Self {
        Self { root, proof }
    }

    /// Check this proof for `leaf` against the `registered` root of `kind`.
    pub fn verify(&self, kind: RootKind, registered: &Hash, leaf: &Hash) -> Result<(), MarketError> {
        if is_zero_hash(&self.root) {
            return Err(MarketError::MerkleRootZero(kind));
        }
        if self.root != *registered {
            return Err(MarketError::InvalidRoot(kind));
        }
        if !verify_proof(&self.proof, &self.root, leaf) {
            return Err(MarketError::InvalidProof(kind));
        }
        Ok(())
    }
}

// =============================================================================
// LEAVES
// =============================================================================

/// Leaf of the dAPI management tree.
pub fn dapi_management_leaf(
    dapi_name: &DapiName,
    data_feed_id: &Hash,
    sponsor_wallet: &Address,
) -> Hash {
    leaf_hash(&encode(&[
        Token::Word(*dapi_name.as_bytes()),
        Token::Word(*data_feed_id),
        Token::Word(word_from_address(sponsor_wallet)),
    ]))
}

/// Leaf of the dAPI pricing tree.
pub fn dapi_pricing_leaf(
    dapi_name: &DapiName,
    chain_id: u64,
    update_parameters: &[u8],
    duration: u64,
    price: U256,
) -> Hash {
    leaf_hash(&encode(&[
        Token::Word(*dapi_name.as_bytes()),
        Token::Word(word_from_u64(chain_id)),
        Token::Bytes(update_parameters.to_vec()),
        Token::Word(word_from_u64(duration)),
        Token::Word(word_from_u256(price)),
    ]))
}

/// Leaf of the signed API URL tree.
pub fn signed_api_url_leaf(airnode: &Address, url: &str) -> Hash {
    leaf_hash(&encode(&[
        Token::Word(word_from_address(airnode)),
        Token::Bytes(url.as_bytes().to_vec()),
    ]))
}
