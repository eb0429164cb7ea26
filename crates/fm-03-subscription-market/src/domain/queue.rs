//! # Subscription Queue
//!
//! Per dAPI name, at most [`SubscriptionQueue::CAPACITY`] subscriptions
//! sorted by end timestamp.
//!
//! INVARIANTS:
//! - end timestamps strictly increase left to right
//! - every entry is strictly weaker than its predecessor, so the head is the
//!   strongest subscription and the first to end
//! - all entries share one deviation reference
//!
//! A purchase only enters the queue if it buys something no queued entry
//! already provides: stronger parameters, or the same-or-weaker parameters
//! for longer. Buying parameters that are already queued is a renewal: the
//! entry takes the new end timestamp and daily price and only has to keep
//! its place between its neighbours.

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

use super::errors::MarketError;
use super::subscription::Subscription;

/// Ordered subscriptions of one dAPI name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionQueue {
    entries: Vec<Subscription>,
}

impl SubscriptionQueue {
    /// Maximum number of queued subscriptions.
    pub const CAPACITY: usize = 5;

    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current subscription.
    pub fn head(&self) -> Option<&Subscription> {
        self.entries.first()
    }

    /// Entries in end-timestamp order.
    pub fn entries(&self) -> &[Subscription] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue that would result from accepting `candidate` at `now`.
    ///
    /// Pure: `self` is left untouched whether or not the candidate is
    /// accepted. Entries that have ended by `now` are dropped from the plan.
    /// A queued entry with the candidate's id is replaced rather than
    /// compared against.
    pub fn plan_insertion(
        &self,
        candidate: &Subscription,
        now: Timestamp,
    ) -> Result<SubscriptionQueue, MarketError> {
        let mut kept = Vec::with_capacity(self.entries.len() + 1);

        for queued in self.entries.iter().filter(|s| !s.has_ended(now)) {
            if queued.id == candidate.id {
                // Renewal
                continue;
            }
            let new = &candidate.parameters;
            let old = &queued.parameters;
            new.ensure_comparable(old)?;

            let later = candidate.end_timestamp > queued.end_timestamp;
            if !later && !new.is_strictly_stronger(old) {
                return Err(MarketError::SubscriptionDoesNotUpgrade);
            }
            if new.is_incomparable(old) {
                return Err(MarketError::UpdateParametersIncomparable);
            }
            if new.is_stronger_or_equal(old) && candidate.end_timestamp >= queued.end_timestamp {
                // Superseded: the candidate covers it completely
                continue;
            }
            kept.push(queued.clone());
        }

        let position = kept.partition_point(|s| s.end_timestamp < candidate.end_timestamp);
        kept.insert(position, candidate.clone());

        if kept.len() > Self::CAPACITY {
            return Err(MarketError::QueueFull);
        }

        let planned = SubscriptionQueue { entries: kept };
        debug_assert!(planned.invariants_hold());
        Ok(planned)
    }

    /// Drop the head and every following entry that has ended by `now`.
    ///
    /// Returns the number of entries removed.
    pub fn advance(&mut self, now: Timestamp) -> Result<usize, MarketError> {
        let head = self.head().ok_or(MarketError::SubscriptionQueueEmpty)?;
        if !head.has_ended(now) {
            return Err(MarketError::CurrentSubscriptionNotEnded {
                end: head.end_timestamp,
                now,
            });
        }
        let ended = self.entries.partition_point(|s| s.has_ended(now));
        self.entries.drain(..ended);
        Ok(ended)
    }

    /// Check ordering, strength and reference invariants.
    pub fn invariants_hold(&self) -> bool {
        self.entries.len() <= Self::CAPACITY
            && self.entries.windows(2).all(|pair| {
                let (a, b) = (&pair[0], &pair[1]);
                a.end_timestamp < b.end_timestamp
                    && a.parameters.deviation_reference == b.parameters.deviation_reference
                    && a.parameters.is_strictly_stronger(&b.parameters)
            })
    }
}
