//! # FM-02 Active-Set Registry
//!
//! Tracks which data feeds and dAPI names are currently being kept up to
//! date, with the update parameters each one must be updated under.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - O(1) activate, deactivate, count and indexed enumeration of active
//!   subjects, for off-chain updaters that page through the set
//! - Update parameter blobs per subject, stored once per distinct blob
//! - Data feed details (beacon or beacon set) keyed by derived id
//! - Signed API URLs per airnode
//!
//! The registry does no authorization of its own. Writes are issued by the
//! subscription market after it has checked proofs and payment.
//!
//! ## Module Structure
//!
//! ```text
//! fm-02-active-set/
//! ├── domain/          # ActiveSet, Subject, DataFeedDetails, errors
//! ├── ports/           # ActiveSetApi
//! ├── events.rs        # ActiveSetEvent
//! └── service.rs       # ActiveSetRegistry
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    derive_beacon_id, derive_beacon_set_id, ActiveSet, ActiveSetError, ActiveSubject, Beacon,
    DataFeedDetails, Subject, MAXIMUM_BEACON_COUNT_IN_SET,
};
pub use events::ActiveSetEvent;
pub use ports::ActiveSetApi;
pub use service::{
    ActiveSetRegistry, MAXIMUM_SIGNED_API_URL_LENGTH, MAXIMUM_UPDATE_PARAMETERS_LENGTH,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
