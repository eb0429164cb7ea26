//! # Merkle Proofs
//!
//! Sorted-pair keccak-256 tree compatible with OpenZeppelin's
//! `MerkleProof.verify`.
//!
//! ## Layout
//!
//! - Leaf hash: `keccak256(keccak256(encoded_leaf))`
//! - Internal node: `keccak256(min(a, b) || max(a, b))`
//! - Odd node at the end of a level is carried up unchanged
//!
//! Because pairs are sorted, a proof is only the list of sibling hashes and
//! carries no left/right flags.

use crate::errors::CryptoError;
use crate::hashing::{keccak256, keccak256_concat};
use shared_types::Hash;

/// Double-hashed leaf of ABI-encoded leaf data.
pub fn leaf_hash(encoded_leaf: &[u8]) -> Hash {
    keccak256(&keccak256(encoded_leaf))
}

/// Hash two sibling nodes in sorted order.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        keccak256_concat(&[a, b])
    } else {
        keccak256_concat(&[b, a])
    }
}

/// Fold `proof` onto `leaf`, returning the implied root.
pub fn process_proof(proof: &[Hash], leaf: &Hash) -> Hash {
    proof
        .iter()
        .fold(*leaf, |computed, sibling| hash_pair(&computed, sibling))
}

/// True iff `leaf` is included under `root` via `proof`.
pub fn verify_proof(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
    process_proof(proof, leaf) == *root
}

/// In-memory Merkle tree, used to build roots and proofs off-chain and in tests.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// levels[0] are the leaves, the last level holds only the root
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree over already-hashed leaves (see [`leaf_hash`]).
    pub fn new(leaves: Vec<Hash>) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(CryptoError::EmptyMerkleTree);
        }

        let mut levels = vec![leaves];
        while levels[levels.len() - 1].len() > 1 {
            let current = &levels[levels.len() - 1];
            let next: Vec<Hash> = current
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Root of the tree.
    pub fn root(&self) -> Hash {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            position /= 2;
        }
        Some(proof)
    }
}
