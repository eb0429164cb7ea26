//! # Adapters
//!
//! Outbound port implementations: the hash registry as root provider, and
//! in-memory collaborators used by the runtime and tests.

pub mod hash_registry;
pub mod memory;

pub use memory::{InMemoryDataFeedStore, InMemoryLedger, StaticRoleRegistry};
