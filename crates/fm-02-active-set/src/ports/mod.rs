//! # Ports Module
//!
//! The registry has no outbound dependencies besides its event sink.

pub mod inbound;

pub use inbound::*;
