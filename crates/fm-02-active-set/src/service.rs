//! # Active-Set Registry
//!
//! Application service implementing [`ActiveSetApi`].
//!
//! ## Storage
//!
//! | Data | Layout |
//! |------|--------|
//! | Active data feeds | [`ActiveSet<Hash>`] |
//! | Active dAPI names | [`ActiveSet<DapiName>`] |
//! | Update parameters | subject → blob hash → blob (each blob stored once) |
//! | Data feed details | id → registered bytes |
//! | Signed API URLs | airnode → URL |
//!
//! Index space for [`ActiveSetApi::get`] lists data feeds first, then dAPI
//! names, so the position of a dAPI name shifts when data feeds come and go.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{
    ActiveSet, ActiveSetError, ActiveSubject, DataFeedDetails, Subject,
};
use crate::events::ActiveSetEvent;
use crate::ports::ActiveSetApi;
use shared_crypto::keccak256;
use shared_types::{is_zero_address, is_zero_hash, Address, DapiName, EventSink, Hash};

/// Largest update parameter blob the registry stores.
pub const MAXIMUM_UPDATE_PARAMETERS_LENGTH: usize = 1024;

/// Largest signed API URL the registry stores.
pub const MAXIMUM_SIGNED_API_URL_LENGTH: usize = 256;

/// Active-Set Registry.
pub struct ActiveSetRegistry {
    data_feeds: ActiveSet<Hash>,
    dapi_names: ActiveSet<DapiName>,
    parameters_hash: HashMap<Subject, Hash>,
    parameters: HashMap<Hash, Vec<u8>>,
    details: HashMap<Hash, Vec<u8>>,
    signed_api_urls: HashMap<Address, String>,
    events: Arc<dyn EventSink<ActiveSetEvent>>,
}

impl ActiveSetRegistry {
    /// Empty registry publishing to `events`.
    pub fn new(events: Arc<dyn EventSink<ActiveSetEvent>>) -> Self {
        Self {
            data_feeds: ActiveSet::new(),
            dapi_names: ActiveSet::new(),
            parameters_hash: HashMap::new(),
            parameters: HashMap::new(),
            details: HashMap::new(),
            signed_api_urls: HashMap::new(),
            events,
        }
    }

    /// Number of active data feeds.
    pub fn active_data_feed_id_count(&self) -> usize {
        self.data_feeds.len()
    }

    /// Number of active dAPI names.
    pub fn active_dapi_name_count(&self) -> usize {
        self.dapi_names.len()
    }

    fn subject_at(&self, index: usize) -> Option<Subject> {
        match self.data_feeds.get(index) {
            Some(id) => Some(Subject::DataFeed(id)),
            None => self
                .dapi_names
                .get(index - self.data_feeds.len())
                .map(Subject::DapiName),
        }
    }
}

fn ensure_subject(subject: &Subject) -> Result<(), ActiveSetError> {
    match subject {
        Subject::DataFeed(id) if is_zero_hash(id) => Err(ActiveSetError::DataFeedIdZero),
        Subject::DapiName(name) if name.is_zero() => Err(ActiveSetError::DapiNameZero),
        _ => Ok(()),
    }
}

impl ActiveSetApi for ActiveSetRegistry {
    fn activate(&mut self, subject: Subject) -> Result<(), ActiveSetError> {
        ensure_subject(&subject)?;
        let added = match subject {
            Subject::DataFeed(id) => self.data_feeds.insert(id),
            Subject::DapiName(name) => self.dapi_names.insert(name),
        };
        if added {
            debug!("[fm-02] Activated {:?}", subject);
            self.events.publish(ActiveSetEvent::Activated(subject));
        }
        Ok(())
    }

    fn deactivate(&mut self, subject: Subject) -> Result<(), ActiveSetError> {
        ensure_subject(&subject)?;
        let removed = match subject {
            Subject::DataFeed(id) => self.data_feeds.remove(&id),
            Subject::DapiName(name) => self.dapi_names.remove(&name),
        };
        if removed {
            debug!("[fm-02] Deactivated {:?}", subject);
            self.events.publish(ActiveSetEvent::Deactivated(subject));
        }
        Ok(())
    }

    fn set_update_parameters(
        &mut self,
        subject: Subject,
        update_parameters: &[u8],
    ) -> Result<(), ActiveSetError> {
        ensure_subject(&subject)?;
        if update_parameters.len() > MAXIMUM_UPDATE_PARAMETERS_LENGTH {
            return Err(ActiveSetError::UpdateParametersTooLong {
                length: update_parameters.len(),
                max: MAXIMUM_UPDATE_PARAMETERS_LENGTH,
            });
        }

        let hash = keccak256(update_parameters);
        let current = self
            .parameters_hash
            .get(&subject)
            .copied()
            .unwrap_or_else(|| keccak256(&[]));
        if current == hash {
            return Ok(());
        }

        self.parameters
            .entry(hash)
            .or_insert_with(|| update_parameters.to_vec());
        self.parameters_hash.insert(subject, hash);

        debug!("[fm-02] Update parameters set for {:?}", subject);
        self.events.publish(ActiveSetEvent::UpdateParametersSet {
            subject,
            update_parameters: update_parameters.to_vec(),
        });
        Ok(())
    }

    fn count(&self) -> usize {
        self.data_feeds.len() + self.dapi_names.len()
    }

    fn get(&self, index: usize) -> Option<ActiveSubject> {
        let subject = self.subject_at(index)?;
        Some(ActiveSubject {
            subject,
            is_active: true,
            update_parameters: self.update_parameters(&subject),
        })
    }

    fn is_active(&self, subject: &Subject) -> bool {
        match subject {
            Subject::DataFeed(id) => self.data_feeds.contains(id),
            Subject::DapiName(name) => self.dapi_names.contains(name),
        }
    }

    fn update_parameters(&self, subject: &Subject) -> Vec<u8> {
        self.parameters_hash
            .get(subject)
            .and_then(|hash| self.parameters.get(hash))
            .cloned()
            .unwrap_or_default()
    }

    fn register_data_feed(&mut self, details: &[u8]) -> Result<Hash, ActiveSetError> {
        let decoded = DataFeedDetails::decode(details)?;
        let data_feed_id = decoded.data_feed_id();

        if !self.details.contains_key(&data_feed_id) {
            self.details.insert(data_feed_id, details.to_vec());
            info!(
                "[fm-02] Registered data feed with {} beacon(s)",
                decoded.beacons().len()
            );
            self.events.publish(ActiveSetEvent::DataFeedRegistered {
                data_feed_id,
                details: details.to_vec(),
            });
        }
        Ok(data_feed_id)
    }

    fn data_feed_details(&self, data_feed_id: &Hash) -> Option<Vec<u8>> {
        self.details.get(data_feed_id).cloned()
    }

    fn decoded_data_feed_details(&self, data_feed_id: &Hash) -> Option<DataFeedDetails> {
        self.details
            .get(data_feed_id)
            .and_then(|bytes| DataFeedDetails::decode(bytes).ok())
    }

    fn data_feed_is_registered(&self, data_feed_id: &Hash) -> bool {
        self.details.contains_key(data_feed_id)
    }

    fn set_signed_api_url(&mut self, airnode: Address, url: String) -> Result<(), ActiveSetError> {
        if is_zero_address(&airnode) {
            return Err(ActiveSetError::AirnodeZero);
        }
        if url.len() > MAXIMUM_SIGNED_API_URL_LENGTH {
            return Err(ActiveSetError::SignedApiUrlTooLong {
                length: url.len(),
                max: MAXIMUM_SIGNED_API_URL_LENGTH,
            });
        }
        if self.signed_api_url(&airnode) == url {
            return Ok(());
        }

        self.signed_api_urls.insert(airnode, url.clone());
        debug!("[fm-02] Signed API URL set");
        self.events
            .publish(ActiveSetEvent::SignedApiUrlSet { airnode, url });
        Ok(())
    }

    fn signed_api_url(&self, airnode: &Address) -> String {
        self.signed_api_urls.get(airnode).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Beacon;
    use shared_types::RecordingSink;

    fn registry() -> (ActiveSetRegistry, Arc<RecordingSink<ActiveSetEvent>>) {
        let events = Arc::new(RecordingSink::new());
        (ActiveSetRegistry::new(events.clone()), events)
    }

    fn name(s: &str) -> DapiName {
        DapiName::new(s).unwrap()
    }

    #[test]
    fn test_activate_is_idempotent() {
        let (mut registry, events) = registry();
        let subject = Subject::DapiName(name("ETH/USD"));

        registry.activate(subject).unwrap();
        registry.activate(subject).unwrap();

        assert_eq!(registry.count(), 1);
        assert!(registry.is_active(&subject));
        assert_eq!(events.events(), vec![ActiveSetEvent::Activated(subject)]);
    }

    #[test]
    fn test_deactivate_inactive_is_silent() {
        let (mut registry, events) = registry();
        registry
            .deactivate(Subject::DataFeed([1u8; 32]))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_index_space_lists_data_feeds_first() {
        let (mut registry, _) = registry();
        let eth = Subject::DapiName(name("ETH/USD"));
        let feed_a = Subject::DataFeed([1u8; 32]);
        let feed_b = Subject::DataFeed([2u8; 32]);

        registry.activate(eth).unwrap();
        registry.activate(feed_a).unwrap();
        registry.activate(feed_b).unwrap();

        assert_eq!(registry.count(), 3);
        assert_eq!(registry.get(0).unwrap().subject, feed_a);
        assert_eq!(registry.get(1).unwrap().subject, feed_b);
        assert_eq!(registry.get(2).unwrap().subject, eth);
        assert!(registry.get(3).is_none());

        registry.deactivate(feed_a).unwrap();
        assert_eq!(registry.get(0).unwrap().subject, feed_b);
        assert_eq!(registry.get(1).unwrap().subject, eth);
        assert_eq!(registry.active_data_feed_id_count(), 1);
        assert_eq!(registry.active_dapi_name_count(), 1);
    }

    #[test]
    fn test_zero_subjects_rejected() {
        let (mut registry, _) = registry();
        assert_eq!(
            registry.activate(Subject::DataFeed([0u8; 32])),
            Err(ActiveSetError::DataFeedIdZero)
        );
        assert_eq!(
            registry.activate(Subject::DapiName(DapiName::default())),
            Err(ActiveSetError::DapiNameZero)
        );
    }

    #[test]
    fn test_update_parameters_change_only() {
        let (mut registry, events) = registry();
        let subject = Subject::DapiName(name("BTC/USD"));

        registry.set_update_parameters(subject, &[]).unwrap();
        assert!(events.is_empty());

        registry.set_update_parameters(subject, &[1, 2, 3]).unwrap();
        registry.set_update_parameters(subject, &[1, 2, 3]).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(registry.update_parameters(&subject), vec![1, 2, 3]);

        registry.activate(subject).unwrap();
        assert_eq!(registry.get(0).unwrap().update_parameters, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_parameters_blob_shared() {
        let (mut registry, _) = registry();
        let a = Subject::DapiName(name("A"));
        let b = Subject::DapiName(name("B"));
        registry.set_update_parameters(a, &[9; 96]).unwrap();
        registry.set_update_parameters(b, &[9; 96]).unwrap();
        assert_eq!(registry.parameters.len(), 1);
        assert_eq!(registry.update_parameters(&b), vec![9; 96]);
    }

    #[test]
    fn test_update_parameters_too_long() {
        let (mut registry, _) = registry();
        let err = registry
            .set_update_parameters(Subject::DataFeed([1u8; 32]), &[0u8; 1025])
            .unwrap_err();
        assert_eq!(
            err,
            ActiveSetError::UpdateParametersTooLong {
                length: 1025,
                max: 1024
            }
        );
    }

    #[test]
    fn test_register_data_feed_once() {
        let (mut registry, events) = registry();
        let details = DataFeedDetails::Beacon(Beacon {
            airnode: [5u8; 20],
            template_id: [6u8; 32],
        });
        let bytes = details.encode();

        let id = registry.register_data_feed(&bytes).unwrap();
        assert_eq!(registry.register_data_feed(&bytes).unwrap(), id);

        assert_eq!(id, details.data_feed_id());
        assert!(registry.data_feed_is_registered(&id));
        assert_eq!(registry.data_feed_details(&id), Some(bytes));
        assert_eq!(registry.decoded_data_feed_details(&id), Some(details));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_signed_api_url() {
        let (mut registry, events) = registry();
        let airnode = [7u8; 20];

        registry
            .set_signed_api_url(airnode, "https://signed-api.example.com".into())
            .unwrap();
        registry
            .set_signed_api_url(airnode, "https://signed-api.example.com".into())
            .unwrap();
        assert_eq!(
            registry.signed_api_url(&airnode),
            "https://signed-api.example.com"
        );
        assert_eq!(events.len(), 1);

        assert_eq!(
            registry.set_signed_api_url([0u8; 20], String::new()),
            Err(ActiveSetError::AirnodeZero)
        );
        assert_eq!(
            registry.set_signed_api_url(airnode, "x".repeat(257)),
            Err(ActiveSetError::SignedApiUrlTooLong {
                length: 257,
                max: 256
            })
        );
    }
}
