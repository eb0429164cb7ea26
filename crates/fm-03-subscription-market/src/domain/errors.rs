//! # Domain Errors
//!
//! Every rejection aborts the call before any state or balance changes.

use fm_02_active_set::ActiveSetError;
use shared_types::{ErrorKind, Timestamp, U256};
use thiserror::Error;

use super::proofs::RootKind;

/// Subscription market error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    // =========================================================================
    // VALIDATION
    // =========================================================================
    /// The zero dAPI name is reserved.
    #[error("dAPI name zero")]
    DapiNameZero,

    /// The zero data feed id is reserved.
    #[error("Data feed ID zero")]
    DataFeedIdZero,

    /// A sponsor wallet is required for a non-zero data feed.
    #[error("Sponsor wallet address zero")]
    SponsorWalletZero,

    /// Clearing a dAPI name requires a zero sponsor wallet.
    #[error("Sponsor wallet address not zero")]
    SponsorWalletNotZero,

    /// Update parameters are not a canonical 96-byte record.
    #[error("Invalid update parameters")]
    InvalidUpdateParameters,

    /// Subscriptions must last at least one second.
    #[error("Duration zero")]
    DurationZero,

    /// Subscriptions must cost something.
    #[error("Price zero")]
    PriceZero,

    /// `now + duration` does not fit a timestamp.
    #[error("Timestamp overflow")]
    TimestampOverflow,

    /// `price * 86400` does not fit 256 bits.
    #[error("Price overflow")]
    PriceOverflow,

    // =========================================================================
    // AUTHORIZATION
    // =========================================================================
    /// Caller supplied the zero root.
    #[error("{0} root zero")]
    MerkleRootZero(RootKind),

    /// Caller's root is not the one attested in the hash registry.
    #[error("Invalid {0} root")]
    InvalidRoot(RootKind),

    /// Leaf is not under the root.
    #[error("Invalid {0} proof")]
    InvalidProof(RootKind),

    /// The market is not allowed to point this dAPI name elsewhere.
    #[error("Sender cannot set dAPI name")]
    SenderCannotSetAliasName,

    // =========================================================================
    // STATE CONFLICT
    // =========================================================================
    /// No details were registered for the data feed.
    #[error("Data feed not registered")]
    DataFeedNotRegistered,

    /// Data feed has not been updated recently enough.
    #[error("Data feed value stale: last update at {timestamp}, now {now}")]
    DataFeedValueStale {
        /// Last update
        timestamp: Timestamp,
        /// Current time
        now: Timestamp,
    },

    /// Queued subscriptions use a different deviation reference.
    #[error("Deviation references not equal")]
    DeviationReferencesNotEqual,

    /// Subscription is neither stronger nor longer than a queued one.
    #[error("Subscription does not upgrade")]
    SubscriptionDoesNotUpgrade,

    /// Subscription ends later than a queued one but neither is stronger.
    #[error("Update parameters incomparable")]
    UpdateParametersIncomparable,

    /// Accepting the subscription would exceed the queue capacity.
    #[error("Subscription queue full")]
    QueueFull,

    /// Attached payment does not cover the sponsor wallet shortfall.
    #[error("Insufficient payment: required {required}, attached {attached}")]
    InsufficientPayment {
        /// Amount that must be forwarded
        required: U256,
        /// Amount the caller attached
        attached: U256,
    },

    /// Nothing is queued for the dAPI name.
    #[error("Subscription queue empty")]
    SubscriptionQueueEmpty,

    /// Current subscription is still running.
    #[error("Current subscription not ended: ends at {end}, now {now}")]
    CurrentSubscriptionNotEnded {
        /// End of the current subscription
        end: Timestamp,
        /// Current time
        now: Timestamp,
    },

    /// The dAPI name already points at the requested data feed.
    #[error("Does not update dAPI name")]
    DoesNotUpdateDapiName,

    // =========================================================================
    // RESOURCE
    // =========================================================================
    /// Payment could not be delivered to the sponsor wallet.
    #[error("Transfer unsuccessful: {0}")]
    TransferUnsuccessful(String),

    /// Rejected by the active-set registry.
    #[error(transparent)]
    Registry(#[from] ActiveSetError),
}

impl MarketError {
    /// Error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DapiNameZero
            | Self::DataFeedIdZero
            | Self::SponsorWalletZero
            | Self::SponsorWalletNotZero
            | Self::InvalidUpdateParameters
            | Self::DurationZero
            | Self::PriceZero
            | Self::TimestampOverflow
            | Self::PriceOverflow => ErrorKind::Validation,
            Self::MerkleRootZero(_)
            | Self::InvalidRoot(_)
            | Self::InvalidProof(_)
            | Self::SenderCannotSetAliasName => ErrorKind::Authorization,
            Self::DataFeedNotRegistered
            | Self::DataFeedValueStale { .. }
            | Self::DeviationReferencesNotEqual
            | Self::SubscriptionDoesNotUpgrade
            | Self::UpdateParametersIncomparable
            | Self::QueueFull
            | Self::InsufficientPayment { .. }
            | Self::SubscriptionQueueEmpty
            | Self::CurrentSubscriptionNotEnded { .. }
            | Self::DoesNotUpdateDapiName => ErrorKind::StateConflict,
            Self::TransferUnsuccessful(_) => ErrorKind::Resource,
            Self::Registry(inner) => inner.kind(),
        }
    }
}
