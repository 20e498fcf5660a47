//! Query windows and calendar-grid window resolution.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Closed date range `[start, end]`.
///
/// A window whose `start` is after its `end` is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Narrows this window to `[max(start, lower), min(end, upper)]`.
    #[must_use]
    pub fn clamp_to(&self, lower: NaiveDate, upper: NaiveDate) -> Self {
        Self {
            start: self.start.max(lower),
            end: self.end.min(upper),
        }
    }

    /// Moves `start` back by `days`, saturating at the earliest supported date.
    #[must_use]
    pub fn extend_back(&self, days: u16) -> Self {
        Self {
            start: self
                .start
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end: self.end,
        }
    }
}

/// Number of days from `week_start` forward to `day`, in `0..7`.
fn days_since_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// ## Summary
/// Resolves the visible calendar window for the month containing `query`.
///
/// The window starts on the first day of the month rolled back to
/// `week_start`, and ends on the last day of the month rolled forward to the
/// day before `week_start`, so it always spans whole weeks.
///
/// ## Errors
/// Returns `CalendarError::InvalidArgument` when the rolled window would fall
/// outside the supported date range.
pub fn resolve_month_window(query: NaiveDate, week_start: Weekday) -> CalendarResult<DateWindow> {
    let out_of_range =
        || CalendarError::InvalidArgument(format!("date {query} is outside the supported range"));

    let month_first = query.with_day(1).ok_or_else(out_of_range)?;
    let month_last = month_first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(out_of_range)?;

    let lead = days_since_week_start(month_first.weekday(), week_start);
    let trail = 6 - days_since_week_start(month_last.weekday(), week_start);

    let start = month_first
        .checked_sub_days(Days::new(u64::from(lead)))
        .ok_or_else(out_of_range)?;
    let end = month_last
        .checked_add_days(Days::new(u64::from(trail)))
        .ok_or_else(out_of_range)?;

    tracing::trace!(%query, %start, %end, ?week_start, "Resolved month window");
    Ok(DateWindow::new(start, end))
}

/// ## Summary
/// Parses a caller-supplied date.
///
/// Accepts `YYYY-MM-DD` as well as `YYYY-MM-DDTHH:MM:SS` (with or without a
/// UTC offset), keeping only the date part.
///
/// ## Errors
/// Returns `CalendarError::InvalidArgument` if the value matches none of the
/// accepted formats.
pub fn parse_date(value: &str) -> CalendarResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|err| CalendarError::InvalidArgument(format!("invalid date '{value}': {err}")))
}
