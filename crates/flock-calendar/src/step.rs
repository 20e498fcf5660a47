//! Calendar arithmetic for cadence steps.
//!
//! ## Summary
//! The n-th occurrence is always computed from the anchor rather than from the
//! previous occurrence. Month and year steps clamp to the last day of the
//! target month, and because each step restarts from the anchor a clamped
//! February does not drag later months down (Jan 31, Feb 28, Mar 31).

use chrono::{Days, Months, NaiveDate};

use crate::frequency::Cadence;

impl Cadence {
    /// ## Summary
    /// Returns `anchor` advanced by `n` steps of this cadence.
    ///
    /// Returns `None` when the result falls outside the supported date range.
    #[must_use]
    pub fn nth_after(self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => anchor.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly => anchor.checked_add_days(Days::new(u64::from(n) * 7)),
            Self::Monthly => anchor.checked_add_months(Months::new(n)),
            Self::Annually => anchor.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }
}
