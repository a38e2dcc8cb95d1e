//! Recency window used by the audit date rules.

use crate::model::EpochMs;
use serde::{Deserialize, Serialize};

const DEFAULT_PAST_SECONDS: u32 = 60;

/// Allowed interval around the evaluation instant.
///
/// A date is recent when `now - past <= date <= now + future`, both ends
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyWindow {
    pub past_seconds: u32,
    pub future_seconds: u32,
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self {
            past_seconds: DEFAULT_PAST_SECONDS,
            future_seconds: 0,
        }
    }
}

impl RecencyWindow {
    /// Inclusive `(start, end)` bounds relative to `now`.
    pub fn bounds(&self, now: EpochMs) -> (EpochMs, EpochMs) {
        let start = now.saturating_sub(i64::from(self.past_seconds) * 1000);
        let end = now.saturating_add(i64::from(self.future_seconds) * 1000);
        (start, end)
    }

    pub fn contains(&self, now: EpochMs, date: EpochMs) -> bool {
        let (start, end) = self.bounds(now);
        (start..=end).contains(&date)
    }
}
