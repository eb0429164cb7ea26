//! # Domain Module
//!
//! Signer sets, attested hashes, signature packages and their digests.
//! No I/O; signature recovery is reached through the outbound port.

pub mod entities;
pub mod errors;
pub mod signatures;

pub use entities::*;
pub use errors::*;
pub use signatures::*;
