//! # Domain Module
//!
//! Active sets, subjects, data feed details and their errors.

pub mod active_set;
pub mod data_feed;
pub mod errors;
pub mod subject;

pub use active_set::ActiveSet;
pub use data_feed::*;
pub use errors::*;
pub use subject::*;
