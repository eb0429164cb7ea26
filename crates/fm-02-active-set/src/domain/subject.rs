//! Subjects the registry can activate.

use serde::{Deserialize, Serialize};
use shared_types::{DapiName, Hash};

/// A data feed id or a dAPI name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// Data feed addressed by its id
    DataFeed(Hash),
    /// Data feed addressed through a dAPI name
    DapiName(DapiName),
}

impl Subject {
    /// Raw 32-byte key.
    pub fn key(&self) -> &[u8; 32] {
        match self {
            Self::DataFeed(id) => id,
            Self::DapiName(name) => name.as_bytes(),
        }
    }
}

/// An active subject together with its stored update parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSubject {
    /// Which subject
    pub subject: Subject,
    /// Always true for subjects read from the active set
    pub is_active: bool,
    /// Stored update parameters (possibly empty)
    pub update_parameters: Vec<u8>,
}
