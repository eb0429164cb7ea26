//! # Active-Set Events
//!
//! Emitted only when a call actually changes state.

use crate::domain::Subject;
use shared_types::{Address, Hash};

/// Events emitted by the active-set registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveSetEvent {
    /// Subject entered the active set.
    Activated(Subject),
    /// Subject left the active set.
    Deactivated(Subject),
    /// Stored update parameters changed.
    UpdateParametersSet {
        /// Subject
        subject: Subject,
        /// New parameters
        update_parameters: Vec<u8>,
    },
    /// Details were registered for the first time.
    DataFeedRegistered {
        /// Derived data feed id
        data_feed_id: Hash,
        /// Registered bytes
        details: Vec<u8>,
    },
    /// Signed API URL changed.
    SignedApiUrlSet {
        /// Airnode
        airnode: Address,
        /// New URL
        url: String,
    },
}
