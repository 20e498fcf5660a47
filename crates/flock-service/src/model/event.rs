//! Stored events and the payload used to create or update them.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use flock_calendar::{Frequency, Schedulable};
use serde::{Deserialize, Serialize};

use super::member::MemberId;
use super::to_sentence;
use crate::error::{ServiceError, ServiceResult};

super::uuid_id! {
    /// Stable identifier of a stored event.
    EventId
}

/// ## Summary
/// A stored event; the base record recurring occurrences are expanded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: EventId,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub frequency: Frequency,
    pub event_location: String,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
}

impl EventTemplate {
    #[must_use]
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            frequency: draft.frequency,
            event_location: draft.event_location,
            member_ids: draft.member_ids,
        }
    }
}

impl Schedulable for EventTemplate {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn frequency(&self) -> Frequency {
        self.frequency
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

/// Validated event fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub frequency: Frequency,
    pub event_location: String,
    pub member_ids: Vec<MemberId>,
}

/// ## Summary
/// Create/update payload as submitted by a client.
///
/// Every field is optional here so that validation can report all missing
/// fields at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEvent {
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub frequency: Option<String>,
    pub event_location: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
}

impl NewEvent {
    /// ## Summary
    /// Validates the payload.
    ///
    /// Description, start time, end time and location are required; the end
    /// may not precede the start; the frequency must be one of the known tags
    /// (empty means non-recurring).
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` with every problem joined into
    /// one sentence.
    pub fn validate(&self) -> ServiceResult<EventDraft> {
        let mut errors = Vec::new();

        let description = required_text(self.description.as_deref(), "Description", &mut errors);
        let event_location =
            required_text(self.event_location.as_deref(), "Event location", &mut errors);
        let start_time = required_datetime(self.start_time.as_deref(), "Start time", &mut errors);
        let end_time = required_datetime(self.end_time.as_deref(), "End time", &mut errors);

        let frequency = match self.frequency.as_deref().map(Frequency::from_str).transpose() {
            Ok(frequency) => frequency.unwrap_or_default(),
            Err(_) => {
                errors.push("Frequency is not included in the list".to_string());
                Frequency::None
            }
        };

        if matches!((start_time, end_time), (Some(start), Some(end)) if end < start) {
            errors.push("End time must be on or after start time".to_string());
        }

        match (description, event_location, start_time, end_time) {
            (Some(description), Some(event_location), Some(start_time), Some(end_time))
                if errors.is_empty() =>
            {
                Ok(EventDraft {
                    description,
                    start_time,
                    end_time,
                    frequency,
                    event_location,
                    member_ids: self.member_ids.clone(),
                })
            }
            _ => Err(ServiceError::ValidationError(to_sentence(&errors))),
        }
    }
}

fn required_text(value: Option<&str>, label: &str, errors: &mut Vec<String>) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.push(format!("{label} can't be blank"));
            None
        }
    }
}

fn required_datetime(
    value: Option<&str>,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<NaiveDateTime> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => {
            let parsed = parse_datetime(text);
            if parsed.is_none() {
                errors.push(format!("{label} is invalid"));
            }
            parsed
        }
        _ => {
            errors.push(format!("{label} can't be blank"));
            None
        }
    }
}

/// ## Summary
/// Parses an event timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM`, the same with a space
/// separator, a bare `YYYY-MM-DD` (midnight), and RFC 3339 with an offset.
/// An offset is dropped and the wall-clock time it was written in is kept,
/// the same way `flock_calendar::parse_date` keeps the written date.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
