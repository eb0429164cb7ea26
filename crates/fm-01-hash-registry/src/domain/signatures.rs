//! # Signature Packages
//!
//! Each signer slot of a registration carries one package.
//!
//! | Length | Variant | Layout |
//! |--------|---------|--------|
//! | 65 | [`SignaturePackage::Direct`] | `r \|\| s \|\| v` |
//! | 162 | [`SignaturePackage::Delegated`] | `expiry word \|\| delegation sig \|\| delegate sig` |
//!
//! Digests are Ethereum signed-message hashes:
//!
//! - payload: `keccak256(hashType || value || timestamp word)`
//! - delegation: `keccak256(delegationHashType || delegate || expiry word)`

use shared_crypto::abi::{u64_from_word, word_from_u64, WORD};
use shared_crypto::ecdsa::SIGNATURE_LENGTH;
use shared_crypto::{
    eth_signed_message_hash, hash_type, keccak256_concat, CryptoError, EcdsaSignature,
    Secp256k1KeyPair,
};
use shared_types::{Address, Hash, Timestamp};

/// Label of the delegation hash type.
pub const DELEGATION_HASH_TYPE_LABEL: &str = "HashRegistry signature delegation";

/// Encoded size of a delegated package.
pub const DELEGATED_PACKAGE_LENGTH: usize = WORD + 2 * SIGNATURE_LENGTH;

/// Hash type the signer signs over when granting a delegation.
pub fn delegation_hash_type() -> Hash {
    hash_type(DELEGATION_HASH_TYPE_LABEL)
}

/// Why a package could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPackageLength(pub usize);

/// A decoded per-slot signature package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignaturePackage {
    /// The slot's signer signed the payload.
    Direct(EcdsaSignature),
    /// A delegate signed the payload under the signer's time-bound grant.
    Delegated {
        /// Last second at which the grant is valid
        expiry: Timestamp,
        /// Signer's signature over the delegation digest
        delegation_signature: EcdsaSignature,
        /// Delegate's signature over the payload digest
        delegate_signature: EcdsaSignature,
    },
}

impl SignaturePackage {
    /// Decode from wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, InvalidPackageLength> {
        let invalid = || InvalidPackageLength(bytes.len());
        match bytes.len() {
            SIGNATURE_LENGTH => EcdsaSignature::from_slice(bytes)
                .map(Self::Direct)
                .map_err(|_| invalid()),
            DELEGATED_PACKAGE_LENGTH => {
                // Expiries beyond u64 never end
                let expiry = u64_from_word(&bytes[..WORD]).unwrap_or(u64::MAX);
                let delegation_signature =
                    EcdsaSignature::from_slice(&bytes[WORD..WORD + SIGNATURE_LENGTH])
                        .map_err(|_| invalid())?;
                let delegate_signature =
                    EcdsaSignature::from_slice(&bytes[WORD + SIGNATURE_LENGTH..])
                        .map_err(|_| invalid())?;
                Ok(Self::Delegated {
                    expiry,
                    delegation_signature,
                    delegate_signature,
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Direct(signature) => signature.to_bytes().to_vec(),
            Self::Delegated {
                expiry,
                delegation_signature,
                delegate_signature,
            } => {
                let mut bytes = Vec::with_capacity(DELEGATED_PACKAGE_LENGTH);
                bytes.extend_from_slice(&word_from_u64(*expiry));
                bytes.extend_from_slice(&delegation_signature.to_bytes());
                bytes.extend_from_slice(&delegate_signature.to_bytes());
                bytes
            }
        }
    }
}

// =============================================================================
// DIGESTS
// =============================================================================

/// Digest every slot ultimately signs for `(hash_type, value, timestamp)`.
pub fn payload_digest(hash_type: &Hash, value: &Hash, timestamp: Timestamp) -> Hash {
    let message = keccak256_concat(&[hash_type, value, &word_from_u64(timestamp)]);
    eth_signed_message_hash(&message)
}

/// Digest a signer signs to delegate to `delegate` until `expiry`.
pub fn delegation_digest(delegate: &Address, expiry: Timestamp) -> Hash {
    let message = keccak256_concat(&[&delegation_hash_type(), delegate, &word_from_u64(expiry)]);
    eth_signed_message_hash(&message)
}

// =============================================================================
// PACKAGE BUILDERS
// =============================================================================

/// Sign the payload directly with the signer's key.
pub fn sign_direct(
    signer: &Secp256k1KeyPair,
    hash_type: &Hash,
    value: &Hash,
    timestamp: Timestamp,
) -> Result<SignaturePackage, CryptoError> {
    let signature = signer.sign_digest(&payload_digest(hash_type, value, timestamp))?;
    Ok(SignaturePackage::Direct(signature))
}

/// Grant a delegation from `signer` to `delegate` until `expiry`.
///
/// The returned signature can be reused for every payload the delegate signs
/// before `expiry`.
pub fn sign_delegation(
    signer: &Secp256k1KeyPair,
    delegate: &Address,
    expiry: Timestamp,
) -> Result<EcdsaSignature, CryptoError> {
    signer.sign_digest(&delegation_digest(delegate, expiry))
}

/// Sign the payload as a delegate holding `delegation_signature`.
pub fn sign_delegated(
    delegate: &Secp256k1KeyPair,
    expiry: Timestamp,
    delegation_signature: EcdsaSignature,
    hash_type: &Hash,
    value: &Hash,
    timestamp: Timestamp,
) -> Result<SignaturePackage, CryptoError> {
    let delegate_signature = delegate.sign_digest(&payload_digest(hash_type, value, timestamp))?;
    Ok(SignaturePackage::Delegated {
        expiry,
        delegation_signature,
        delegate_signature,
    })
}
