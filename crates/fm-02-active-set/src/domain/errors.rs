//! # Domain Errors

use shared_types::ErrorKind;
use thiserror::Error;

/// Active-set registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActiveSetError {
    /// The zero data feed id is reserved.
    #[error("Data feed ID zero")]
    DataFeedIdZero,

    /// The zero dAPI name is reserved.
    #[error("dAPI name zero")]
    DapiNameZero,

    /// Update parameter blob exceeds the storage limit.
    #[error("Update parameters too long: {length} bytes (max {max})")]
    UpdateParametersTooLong {
        /// Supplied length
        length: usize,
        /// Limit
        max: usize,
    },

    /// Details shorter than a single beacon or a two-beacon set.
    #[error("Data feed details too short: {length} bytes")]
    DataFeedDetailsTooShort {
        /// Supplied length
        length: usize,
    },

    /// Details longer than the largest allowed beacon set.
    #[error("Data feed details too long: {length} bytes")]
    DataFeedDetailsTooLong {
        /// Supplied length
        length: usize,
    },

    /// Details name the zero airnode.
    #[error("Airnode address zero")]
    AirnodeZero,

    /// Details length is in range but the layout does not decode.
    #[error("Malformed data feed details")]
    MalformedDataFeedDetails,

    /// Signed API URL exceeds the storage limit.
    #[error("Signed API URL too long: {length} bytes (max {max})")]
    SignedApiUrlTooLong {
        /// Supplied length
        length: usize,
        /// Limit
        max: usize,
    },
}

impl ActiveSetError {
    /// Error class. Every registry error is an input error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
