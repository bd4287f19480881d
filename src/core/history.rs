//! Time-indexed history of readings.
//!
//! Readings arrive from a single producer, so arrival order equals
//! timestamp order and the trailing window can be located by binary
//! search. The history is append-only and unbounded; eviction is left to
//! process exit.

use crate::sampler::types::Reading;
use chrono::{DateTime, Duration, Utc};

/// Append-only, arrival-ordered store of readings.
#[derive(Debug, Default)]
pub struct ReadingHistory {
    readings: Vec<Reading>,
}

impl ReadingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading. Arrival order is preserved.
    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// All readings whose timestamp falls within the trailing `window`
    /// ending at `now`, in arrival order.
    pub fn recent(&self, window: Duration, now: DateTime<Utc>) -> &[Reading] {
        let cutoff = now - window;
        let start = self.readings.partition_point(|r| r.timestamp < cutoff);
        &self.readings[start..]
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Timestamp of the most recent reading, if any.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.readings.last().map(|r| r.timestamp)
    }
}
