//! Clock collaborator.

use crate::model::EpochMs;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the evaluation instant for recency rules.
pub trait Clock {
    fn now(&self) -> EpochMs;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> EpochMs {
        (**self).now()
    }
}

/// Wall clock in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMs {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}
