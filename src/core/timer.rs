//! # Rest Timer
//!
//! A rest is just a duration and the wall-clock instant it started.
//! Remaining time is always recomputed from the clock, never counted down
//! in memory, so a suspended process picks up where the wall clock says it
//! should.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whole seconds left of a `duration_secs` rest that began at `started_at`.
///
/// Clamped to `0..=duration_secs`; a clock that jumped backwards counts as
/// nothing elapsed.
pub fn remaining(duration_secs: u32, started_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let elapsed = (now - started_at).num_seconds().max(0);
    (i64::from(duration_secs) - elapsed).max(0) as u32
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    pub duration_secs: u32,
    pub started_at: DateTime<Utc>,
}

impl RestTimer {
    pub fn start(duration_secs: u32, now: DateTime<Utc>) -> Self {
        Self {
            duration_secs,
            started_at: now,
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> u32 {
        remaining(self.duration_secs, self.started_at, now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now) == 0
    }

    /// Fraction of the rest still left, for the progress gauge.
    pub fn fraction_left(&self, now: DateTime<Utc>) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining(now)) / f64::from(self.duration_secs)
    }
}
