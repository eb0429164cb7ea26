//! # Error Types
//!
//! Error classification used across crates.

use thiserror::Error;

/// Coarse class of a rejected call.
///
/// Every crate's error enum maps its variants onto one of these through a
/// `kind()` method. None of them are retried internally; the call is aborted
/// and the caller decides what to resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unregistered/mismatched root, invalid proof, bad signature, expired
    /// delegation, missing role or ownership.
    Authorization,
    /// Zero identifiers, malformed blobs, zero duration/price, oversized inputs.
    Validation,
    /// Queue full, non-upgrading purchase, incomparable parameters, stale or
    /// unregistered feed, premature advance.
    StateConflict,
    /// Payment could not be delivered.
    Resource,
}

/// Errors building a [`crate::DapiName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DapiNameError {
    /// Empty string.
    #[error("dAPI name empty")]
    Empty,

    /// Does not fit in 31 bytes.
    #[error("dAPI name too long: {length} bytes (max {max})")]
    TooLong { length: usize, max: usize },
}

impl DapiNameError {
    /// Error class.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
