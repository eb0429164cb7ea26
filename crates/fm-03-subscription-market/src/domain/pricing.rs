//! # Proration
//!
//! A queue pays for disjoint segments: the head covers `[t, head.end)`, every
//! later entry covers `[previous.end, entry.end)`. Entries that have ended by
//! `t` contribute nothing.
//!
//! ```text
//! t ──── head.end ──────── e1.end ─────────────── e2.end
//!   head.daily     e1.daily          e2.daily
//! ```

use shared_types::{Timestamp, SECONDS_PER_DAY, U256};

use super::errors::MarketError;
use super::subscription::Subscription;

/// `price * 86400 / duration`, integer division.
pub fn daily_price(price: U256, duration: u64) -> Result<U256, MarketError> {
    if duration == 0 {
        return Err(MarketError::DurationZero);
    }
    let scaled = price
        .checked_mul(U256::from(SECONDS_PER_DAY))
        .ok_or(MarketError::PriceOverflow)?;
    Ok(scaled / U256::from(duration))
}

/// Balance the sponsor wallet needs at `at` to fund every remaining segment.
///
/// `entries` must be sorted by end timestamp.
pub fn expected_balance(entries: &[Subscription], at: Timestamp) -> U256 {
    let day = U256::from(SECONDS_PER_DAY);
    let mut start = at;
    let mut total = U256::zero();
    for entry in entries {
        if entry.end_timestamp <= start {
            continue;
        }
        let covered = U256::from(entry.end_timestamp - start);
        total = total.saturating_add(entry.daily_price.saturating_mul(covered) / day);
        start = entry.end_timestamp;
    }
    total
}
