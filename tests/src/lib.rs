//! # Feed-Market Test Suite
//!
//! Cross-crate flows exercising the hash registry, the active-set registry
//! and the subscription market together, wired the way the runtime wires
//! them.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── fixtures.rs        # Marketplace, Catalog, signer quorum
//! │   └── integration/
//! │       ├── quorum_roots.rs           # register_hash with direct and delegated slots
//! │       ├── subscription_lifecycle.rs # purchase, queueing, advance, proration
//! │       └── keeper_flow.rs            # runtime keeper retiring subscriptions
//! └── benches/
//!     └── market_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fm-tests
//! cargo bench -p fm-tests
//! ```

pub mod fixtures;
pub mod integration;
