//! # ECDSA Signatures (secp256k1)
//!
//! Ethereum-style signatures: 65 bytes `r || s || v`, signer identity is the
//! address derived from the recovered public key.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are
//!   rejected on recovery
//! - **Deterministic nonces**: signing uses RFC 6979 via `k256`

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{Address, Hash};

/// Length of an encoded signature (`r || s || v`).
pub const SIGNATURE_LENGTH: usize = 65;

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse a 65-byte `r || s || v` signature.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidSignatureLength {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signer's address from a prehashed digest.
pub fn recover_address(digest: &Hash, signature: &EcdsaSignature) -> Result<Address, CryptoError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| CryptoError::InvalidSignature)?;

    // normalize_s returns Some only when S was in the upper half
    if sig.normalize_s().is_some() {
        return Err(CryptoError::MalleableSignature);
    }

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&recovered_key))
}

/// Derive the Ethereum address of a public key.
pub fn address_from_verifying_key(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);

    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let normalized = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(CryptoError::InvalidRecoveryId(v)),
    };
    RecoveryId::from_byte(normalized).ok_or(CryptoError::InvalidRecoveryId(v))
}

// =============================================================================
// SIGNING
// =============================================================================

/// secp256k1 keypair with an Ethereum address.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Ethereum address of this key.
    pub fn address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, producing a low-S signature with `v` in {27, 28}.
    pub fn sign_digest(&self, digest: &Hash) -> Result<EcdsaSignature, CryptoError> {
        let (mut sig, mut recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::SigningFailed)?;

        if let Some(normalized) = sig.normalize_s() {
            sig = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        Ok(EcdsaSignature {
            r,
            s,
            v: recovery_id.to_byte() + 27,
        })
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
