//! Persistence ports.
//!
//! ## Summary
//! The calendar and event services only talk to storage through these
//! traits. Implementations must be shareable across request handlers.

use flock_calendar::DateWindow;

use crate::error::ServiceResult;
use crate::model::{EventId, EventTemplate, Member, MemberId};

pub trait EventRepository: Send + Sync {
    /// All events ordered by start time.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn list(&self) -> ServiceResult<Vec<EventTemplate>>;

    /// Events whose own start date lies inside `window`, ordered by start time.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn find_events_overlapping(&self, window: &DateWindow) -> ServiceResult<Vec<EventTemplate>>;

    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, id: EventId) -> ServiceResult<Option<EventTemplate>>;

    /// ## Errors
    /// Returns an error if the backing store cannot be written.
    fn insert(&self, event: EventTemplate) -> ServiceResult<()>;

    /// Replaces a stored event.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no event has `event.id`.
    fn update(&self, event: EventTemplate) -> ServiceResult<()>;

    /// Removes and returns a stored event.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no event has `id`.
    fn delete(&self, id: EventId) -> ServiceResult<EventTemplate>;
}

pub trait MemberRepository: Send + Sync {
    /// All members ordered by last name, then first name.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn list(&self) -> ServiceResult<Vec<Member>>;

    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, id: MemberId) -> ServiceResult<Option<Member>>;

    /// Members for the given ids, skipping ids that are not stored.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn get_many(&self, ids: &[MemberId]) -> ServiceResult<Vec<Member>>;

    /// ## Errors
    /// Returns an error if the backing store cannot be written.
    fn insert(&self, member: Member) -> ServiceResult<()>;

    /// Replaces a stored member.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no member has `member.id`.
    fn update(&self, member: Member) -> ServiceResult<()>;

    /// Removes and returns a stored member.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no member has `id`.
    fn delete(&self, id: MemberId) -> ServiceResult<Member>;

    /// Inserts or replaces every member in one step.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be written; in that case
    /// none of the members are stored.
    fn upsert_all(&self, members: Vec<Member>) -> ServiceResult<()>;
}
