//! # Event Sinks
//!
//! Every service publishes typed events through an [`EventSink`].
//!
//! | Sink | Use |
//! |------|-----|
//! | [`NoOpSink`] | Drop everything |
//! | [`RecordingSink`] | Keep events in memory for assertions |
//! | [`TracingSink`] | Emit each event as a `tracing` record |

use parking_lot::Mutex;
use std::fmt::Debug;
use tracing::info;

/// Destination for events of type `E`.
pub trait EventSink<E>: Send + Sync {
    /// Publish a single event. Sinks must not fail the caller.
    fn publish(&self, event: E);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl<E> EventSink<E> for NoOpSink {
    fn publish(&self, _event: E) {}
}

/// Sink that records events in publication order.
#[derive(Debug)]
pub struct RecordingSink<E> {
    events: Mutex<Vec<E>>,
}

impl<E> RecordingSink<E> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drain all recorded events.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<E: Clone> RecordingSink<E> {
    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }
}

impl<E> Default for RecordingSink<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Send> EventSink<E> for RecordingSink<E> {
    fn publish(&self, event: E) {
        self.events.lock().push(event);
    }
}

/// Sink that logs events at INFO level under the `events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl<E: Debug> EventSink<E> for TracingSink {
    fn publish(&self, event: E) {
        info!(target: "events", "{:?}", event);
    }
}
