//! Subscriptions and their identity.

use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, keccak256_concat};
use shared_types::{DapiName, Hash, Timestamp, U256};

use super::parameters::UpdateParameters;

/// One purchased coverage window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// `keccak256(dapiName || keccak256(updateParameters))`
    pub id: Hash,
    /// Decoded parameters
    pub parameters: UpdateParameters,
    /// Canonical parameter bytes
    pub update_parameters: Vec<u8>,
    /// Coverage ends at this second
    pub end_timestamp: Timestamp,
    /// Price per 86 400 seconds of coverage
    pub daily_price: U256,
}

impl Subscription {
    /// Build a subscription for `dapi_name`.
    pub fn new(
        dapi_name: &DapiName,
        parameters: UpdateParameters,
        end_timestamp: Timestamp,
        daily_price: U256,
    ) -> Self {
        let update_parameters = parameters.encode();
        Self {
            id: subscription_id(dapi_name, &update_parameters),
            parameters,
            update_parameters,
            end_timestamp,
            daily_price,
        }
    }

    /// True once `now` has reached the end.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        self.end_timestamp <= now
    }
}

/// Subscription id. Repeat purchases of the same parameters share it.
pub fn subscription_id(dapi_name: &DapiName, update_parameters: &[u8]) -> Hash {
    keccak256_concat(&[dapi_name.as_bytes(), &keccak256(update_parameters)])
}
