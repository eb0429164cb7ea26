//! # Inbound Ports
//!
//! API trait defining what the active-set registry can do.
//!
//! Mutations take `&mut self`: the registry is owned by the component that
//! authorizes its writes (the subscription market), which serializes access.

use crate::domain::{ActiveSetError, ActiveSubject, DataFeedDetails, Subject};
use shared_types::{Address, Hash};

/// Active-set registry API - inbound port.
pub trait ActiveSetApi: Send + Sync {
    /// Add `subject` to the active set. No-op if already active.
    fn activate(&mut self, subject: Subject) -> Result<(), ActiveSetError>;

    /// Remove `subject` from the active set. No-op if inactive.
    fn deactivate(&mut self, subject: Subject) -> Result<(), ActiveSetError>;

    /// Store update parameters for `subject`. No-op if unchanged.
    fn set_update_parameters(
        &mut self,
        subject: Subject,
        update_parameters: &[u8],
    ) -> Result<(), ActiveSetError>;

    /// Number of active subjects (data feeds and dAPI names).
    fn count(&self) -> usize;

    /// Active subject at `index`; data feeds come first, then dAPI names.
    fn get(&self, index: usize) -> Option<ActiveSubject>;

    /// Membership test.
    fn is_active(&self, subject: &Subject) -> bool;

    /// Stored update parameters (empty if none).
    fn update_parameters(&self, subject: &Subject) -> Vec<u8>;

    /// Register data feed details, returning the data feed id.
    fn register_data_feed(&mut self, details: &[u8]) -> Result<Hash, ActiveSetError>;

    /// Registered details bytes.
    fn data_feed_details(&self, data_feed_id: &Hash) -> Option<Vec<u8>>;

    /// Registered details, decoded.
    fn decoded_data_feed_details(&self, data_feed_id: &Hash) -> Option<DataFeedDetails>;

    /// True if details were registered for `data_feed_id`.
    fn data_feed_is_registered(&self, data_feed_id: &Hash) -> bool;

    /// Store the signed API URL of `airnode`.
    fn set_signed_api_url(&mut self, airnode: Address, url: String) -> Result<(), ActiveSetError>;

    /// Signed API URL of `airnode` (empty if none).
    fn signed_api_url(&self, airnode: &Address) -> String;
}
