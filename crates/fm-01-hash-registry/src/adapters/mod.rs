//! # Adapters
//!
//! Outbound port implementations.

pub mod secp256k1;

pub use secp256k1::Secp256k1Recovery;
