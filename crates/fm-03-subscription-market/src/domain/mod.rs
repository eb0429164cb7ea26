//! # Domain Module
//!
//! Update parameters, subscriptions, the queue planner, proration and Merkle
//! leaves. Pure logic; all I/O goes through the ports.

pub mod errors;
pub mod parameters;
pub mod pricing;
pub mod proofs;
pub mod queue;
pub mod records;
pub mod subscription;

pub use errors::*;
pub use parameters::*;
pub use pricing::*;
pub use proofs::*;
pub use queue::*;
pub use records::*;
pub use subscription::*;
