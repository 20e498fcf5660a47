use std::sync::Arc;

use chrono::NaiveDate;
use flock_calendar::DateWindow;
use serde::Serialize;

use crate::calendar::{CalendarService, EventOccurrence};
use crate::error::{ServiceError, ServiceResult};
use crate::model::{EventId, EventTemplate, Member, MemberId, NewEvent};
use crate::repository::{EventRepository, MemberRepository};

/// Events starting inside a resolved range, plus their recurring occurrences.
#[derive(Debug, Clone, Serialize)]
pub struct EventIndex {
    pub window: DateWindow,
    pub events: Vec<EventTemplate>,
    pub occurrences: Vec<EventOccurrence>,
}

/// An event together with the members assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: EventTemplate,
    pub members: Vec<Member>,
}

/// ## Summary
/// Create, read, update and delete for stored events.
///
/// Payloads are validated before anything is written; member ids on a
/// payload must all refer to stored members. Windows and occurrences come
/// from the same [`CalendarService`] that renders the month view.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    members: Arc<dyn MemberRepository>,
    calendar: CalendarService,
}

impl EventService {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        members: Arc<dyn MemberRepository>,
        calendar: CalendarService,
    ) -> Self {
        Self {
            events,
            members,
            calendar,
        }
    }

    /// ## Summary
    /// Lists events whose start falls between the grid start of the month of
    /// `start` and the grid end of the month of `end`. Missing bounds default
    /// to today.
    ///
    /// `occurrences` holds everything visible in that range in time order,
    /// including recurrences of events that started before it.
    ///
    /// ## Errors
    /// Returns an error if a window cannot be resolved or the store cannot be
    /// read.
    #[tracing::instrument(skip(self))]
    pub fn list(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ServiceResult<EventIndex> {
        let from = self.calendar.window_for(start)?;
        let to = self.calendar.window_for(end)?;
        let window = DateWindow::new(from.start, to.end);

        let events = self.events.find_events_overlapping(&window)?;
        let occurrences = self.calendar.occurrences_in(&window)?;

        Ok(EventIndex {
            window,
            events,
            occurrences,
        })
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if the event does not exist.
    pub fn show(&self, id: EventId) -> ServiceResult<EventDetails> {
        let event = self.find(id)?;
        let members = self.members.get_many(&event.member_ids)?;
        Ok(EventDetails { event, members })
    }

    /// ## Summary
    /// Validates and stores a new event.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` for an invalid payload or an
    /// unknown member id.
    #[tracing::instrument(skip(self, payload))]
    pub fn create(&self, payload: &NewEvent) -> ServiceResult<EventTemplate> {
        let draft = payload.validate()?;
        self.check_members(&draft.member_ids)?;

        let event = EventTemplate::from_draft(EventId::generate(), draft);
        self.events.insert(event.clone())?;
        tracing::info!(event_id = %event.id, frequency = %event.frequency, "Event created");
        Ok(event)
    }

    /// ## Summary
    /// Replaces every field of an existing event with the validated payload.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if the event does not exist, or
    /// `ServiceError::ValidationError` for an invalid payload.
    #[tracing::instrument(skip(self, payload))]
    pub fn update(&self, id: EventId, payload: &NewEvent) -> ServiceResult<EventTemplate> {
        self.find(id)?;
        let draft = payload.validate()?;
        self.check_members(&draft.member_ids)?;

        let event = EventTemplate::from_draft(id, draft);
        self.events.update(event.clone())?;
        tracing::info!(event_id = %id, "Event updated");
        Ok(event)
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if the event does not exist.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: EventId) -> ServiceResult<EventTemplate> {
        let removed = self.events.delete(id)?;
        tracing::info!(event_id = %id, "Event deleted");
        Ok(removed)
    }

    fn find(&self, id: EventId) -> ServiceResult<EventTemplate> {
        self.events
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))
    }

    fn check_members(&self, ids: &[MemberId]) -> ServiceResult<()> {
        let found = self.members.get_many(ids)?;
        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|m| m.id == **id)) {
            return Err(ServiceError::ValidationError(format!(
                "Member {missing} does not exist"
            )));
        }
        Ok(())
    }
}
