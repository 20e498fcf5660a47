//! Month calendar assembly.

pub mod service;

pub use service::{CalendarService, EventOccurrence, MonthView};
