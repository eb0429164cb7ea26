//! Market configuration and validation.

use serde::{Deserialize, Serialize};
use shared_crypto::hash_type;
use shared_types::{Hash, SECONDS_PER_DAY};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Chain id zero.
    #[error("chain_id must be non-zero")]
    ChainIdZero,

    /// Readiness window zero.
    #[error("maximum_update_age_secs must be non-zero")]
    MaximumUpdateAgeZero,

    /// A root label is empty.
    #[error("{0} label must be non-empty")]
    EmptyLabel(&'static str),
}

/// Subscription market configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Chain id bound into every pricing leaf
    pub chain_id: u64,
    /// A data feed older than this cannot be subscribed to (seconds)
    pub maximum_update_age_secs: u64,
    /// Label hashed into the dAPI management root's hash type
    pub dapi_management_label: String,
    /// Label hashed into the dAPI pricing root's hash type
    pub dapi_pricing_label: String,
    /// Label hashed into the signed API URL root's hash type
    pub signed_api_url_label: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            chain_id: 1,
            maximum_update_age_secs: SECONDS_PER_DAY,
            dapi_management_label: "dAPI management Merkle root".to_string(),
            dapi_pricing_label: "dAPI pricing Merkle root".to_string(),
            signed_api_url_label: "Signed API URL Merkle root".to_string(),
        }
    }
}

impl MarketConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id == 0 {
            return Err(ConfigError::ChainIdZero);
        }
        if self.maximum_update_age_secs == 0 {
            return Err(ConfigError::MaximumUpdateAgeZero);
        }
        for (name, label) in [
            ("dapi_management", &self.dapi_management_label),
            ("dapi_pricing", &self.dapi_pricing_label),
            ("signed_api_url", &self.signed_api_url_label),
        ] {
            if label.is_empty() {
                return Err(ConfigError::EmptyLabel(name));
            }
        }
        Ok(())
    }

    /// Builder-style method to set the chain id
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Builder-style method to set the readiness window
    pub fn with_maximum_update_age(mut self, secs: u64) -> Self {
        self.maximum_update_age_secs = secs;
        self
    }

    /// Hash type of the dAPI management root.
    pub fn dapi_management_hash_type(&self) -> Hash {
        hash_type(&self.dapi_management_label)
    }

    /// Hash type of the dAPI pricing root.
    pub fn dapi_pricing_hash_type(&self) -> Hash {
        hash_type(&self.dapi_pricing_label)
    }

    /// Hash type of the signed API URL root.
    pub fn signed_api_url_hash_type(&self) -> Hash {
        hash_type(&self.signed_api_url_label)
    }
}
