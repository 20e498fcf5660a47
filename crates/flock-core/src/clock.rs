//! Injectable source of "today".
//!
//! ## Summary
//! Recurrence anchors default to the current date when the caller does not
//! supply one. Reading the wall clock is isolated behind [`Clock`] so the
//! rest of the workspace stays deterministic under test.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Capability that reports the current calendar date.
pub trait Clock: Send + Sync {
    /// Returns the current date in the organization's time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock, resolved in a fixed IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    time_zone: Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }

    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.time_zone
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
