//! # Shared Types Crate
//!
//! Types every Feed-Market crate agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Address`, `U256` and `DapiName` are
//!   defined once here.
//! - **Injected Time**: services never read the wall clock directly; they go
//!   through a [`TimeSource`].
//! - **Typed Events**: services publish through an [`EventSink`] so that tests
//!   can record exactly what was emitted.

pub mod entities;
pub mod errors;
pub mod events;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use events::{EventSink, NoOpSink, RecordingSink, TracingSink};
pub use time::{ManualClock, SystemTimeSource, TimeSource};
