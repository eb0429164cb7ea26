//! # Runtime Configuration
//!
//! Resolution order, later sources win:
//!
//! 1. built-in defaults
//! 2. JSON file named by `FM_CONFIG` (missing fields keep their defaults)
//! 3. environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FM_OWNER` | `owner` (hex address, `0x` optional) |
//! | `FM_CHAIN_ID` | `market.chain_id` |
//! | `FM_MAX_UPDATE_AGE` | `market.maximum_update_age_secs` |
//! | `FM_KEEPER_INTERVAL_SECS` | `keeper_interval_secs` |
//! | `FM_LOG_LEVEL` | `log_level` |

use anyhow::Context;
use fm_03_subscription_market::{ConfigError, MarketConfig};
use serde::{Deserialize, Serialize};
use shared_types::{is_zero_address, Address};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "FM_CONFIG";

/// Runtime configuration errors.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// Owner is not a 20-byte hex address.
    #[error("invalid owner address: {0}")]
    InvalidOwner(String),

    /// Owner is the zero address; nobody could administer the hash registry.
    #[error("owner must be set (FM_OWNER)")]
    OwnerZero,

    /// Keeper would spin.
    #[error("keeper_interval_secs must be non-zero")]
    KeeperIntervalZero,

    /// Not a tracing level.
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Environment override does not parse.
    #[error("invalid value for {key}: {value}")]
    InvalidEnv {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// Market section rejected.
    #[error("market config: {0}")]
    Market(#[from] ConfigError),
}

/// Complete runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Hash registry owner, hex encoded
    pub owner: String,
    /// Subscription market settings
    pub market: MarketConfig,
    /// Seconds between keeper passes
    pub keeper_interval_secs: u64,
    /// Maximum tracing level
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            market: MarketConfig::default(),
            keeper_interval_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults, then `FM_CONFIG`, then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply overrides from `lookup` (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), RuntimeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(owner) = lookup("FM_OWNER") {
            self.owner = owner;
        }
        if let Some(value) = lookup("FM_CHAIN_ID") {
            self.market.chain_id = parse_env("FM_CHAIN_ID", value)?;
        }
        if let Some(value) = lookup("FM_MAX_UPDATE_AGE") {
            self.market.maximum_update_age_secs = parse_env("FM_MAX_UPDATE_AGE", value)?;
        }
        if let Some(value) = lookup("FM_KEEPER_INTERVAL_SECS") {
            self.keeper_interval_secs = parse_env("FM_KEEPER_INTERVAL_SECS", value)?;
        }
        if let Some(level) = lookup("FM_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), RuntimeConfigError> {
        if is_zero_address(&self.owner_address()?) {
            return Err(RuntimeConfigError::OwnerZero);
        }
        if self.keeper_interval_secs == 0 {
            return Err(RuntimeConfigError::KeeperIntervalZero);
        }
        self.level()?;
        self.market.validate()?;
        Ok(())
    }

    /// Owner as an address.
    pub fn owner_address(&self) -> Result<Address, RuntimeConfigError> {
        let invalid = || RuntimeConfigError::InvalidOwner(self.owner.clone());
        let trimmed = self.owner.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|_| invalid())?;
        Address::try_from(bytes.as_slice()).map_err(|_| invalid())
    }

    /// Log level as a tracing level.
    pub fn level(&self) -> Result<Level, RuntimeConfigError> {
        self.log_level
            .parse()
            .map_err(|_| RuntimeConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Keeper period.
    pub fn keeper_interval(&self) -> Duration {
        Duration::from_secs(self.keeper_interval_secs)
    }

    /// Builder-style method to set the owner
    pub fn with_owner(mut self, owner: &Address) -> Self {
        self.owner = format!("0x{}", hex::encode(owner));
        self
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, RuntimeConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| RuntimeConfigError::InvalidEnv { key, value })
}
