// src/common/id_generator.rs
//! Timestamp-based spot IDs
//!
//! Spot IDs are the creation time in milliseconds since the Unix epoch,
//! rendered as a decimal string. The clock never hands out the same value
//! twice: a second ID requested within the same millisecond (or after the
//! wall clock stepped backwards) becomes `last + 1`.
//!
//! IDs are unique within one process, which is enough for a single user's
//! collection. They are not meant to be unguessable.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic millisecond clock used to mint spot IDs
#[derive(Debug, Default)]
pub struct SpotIdClock {
    last: AtomicI64,
}

impl SpotIdClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next spot ID from the current wall clock
    pub fn next_id(&self) -> String {
        self.next_after(Utc::now().timestamp_millis()).to_string()
    }

    /// Return a value that is at least `now_ms` and strictly greater than any
    /// value handed out before
    pub fn next_after(&self, now_ms: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now_ms > current { now_ms } else { current + 1 };
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}
