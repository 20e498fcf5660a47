//! Recurring-event expansion for the flock calendar.
//!
//! ## Summary
//! A stored event carries a base start and a [`Frequency`]. The
//! [`RecurrenceRuleFactory`] turns that pair into a bounded
//! [`RecurrenceDefinition`], and the [`OccurrenceExpander`] materializes the
//! concrete dates that fall inside a [`DateWindow`]. Month and year steps use
//! calendar arithmetic with end-of-month clamping.

pub mod error;
pub mod expand;
pub mod frequency;
pub mod rule;
pub mod step;
pub mod window;

pub use error::{CalendarError, CalendarResult};
pub use expand::{Occurrence, OccurrenceExpander, Schedulable};
pub use frequency::{Cadence, Frequency};
pub use rule::{HorizonPolicy, RecurrenceDefinition, RecurrenceRuleFactory};
pub use window::{DateWindow, parse_date, resolve_month_window};
