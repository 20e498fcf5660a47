//! In-memory implementation of the persistence ports.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use flock_calendar::DateWindow;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{EventId, EventTemplate, Member, MemberId, NewEvent};
use crate::repository::{EventRepository, MemberRepository};

/// Acquires a read guard and recovers from poisoning.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => {
            lock.clear_poison();
            poisoned.into_inner()
        }
    }
}

/// Acquires a write guard and recovers from poisoning.
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            lock.clear_poison();
            poisoned.into_inner()
        }
    }
}

/// ## Summary
/// Process-local store for events and members.
///
/// Each collection sits behind its own `RwLock`; readers never block each
/// other and every write replaces whole records.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: RwLock<BTreeMap<EventId, EventTemplate>>,
    members: RwLock<BTreeMap<MemberId, Member>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Loads a JSON array of event payloads and stores each as a new event.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or parsed, or if any entry
    /// fails validation. Nothing is stored in that case.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn seed_events_from_path(&self, path: &Path) -> ServiceResult<usize> {
        let raw = std::fs::read_to_string(path)?;
        self.seed_events_from_json(&raw)
    }

    /// ## Summary
    /// Same as [`Self::seed_events_from_path`] for an in-memory document.
    ///
    /// ## Errors
    /// Returns an error if the document cannot be parsed or any entry fails
    /// validation.
    pub fn seed_events_from_json(&self, raw: &str) -> ServiceResult<usize> {
        let payloads: Vec<NewEvent> = serde_json::from_str(raw)?;
        let templates = payloads
            .iter()
            .enumerate()
            .map(|(index, payload)| {
                payload
                    .validate()
                    .map(|draft| EventTemplate::from_draft(EventId::generate(), draft))
                    .map_err(|err| {
                        ServiceError::ValidationError(format!("seed event {index}: {err}"))
                    })
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        let count = templates.len();
        let mut events = write(&self.events);
        for template in templates {
            events.insert(template.id, template);
        }
        tracing::info!(count, "Seeded events");
        Ok(count)
    }
}

fn by_start(mut events: Vec<EventTemplate>) -> Vec<EventTemplate> {
    events.sort_by(|a, b| (a.start_time, a.id).cmp(&(b.start_time, b.id)));
    events
}

impl EventRepository for InMemoryStore {
    fn list(&self) -> ServiceResult<Vec<EventTemplate>> {
        Ok(by_start(read(&self.events).values().cloned().collect()))
    }

    fn find_events_overlapping(&self, window: &DateWindow) -> ServiceResult<Vec<EventTemplate>> {
        let events = read(&self.events)
            .values()
            .filter(|event| window.contains(event.start_time.date()))
            .cloned()
            .collect();
        Ok(by_start(events))
    }

    fn get(&self, id: EventId) -> ServiceResult<Option<EventTemplate>> {
        Ok(read(&self.events).get(&id).cloned())
    }

    fn insert(&self, event: EventTemplate) -> ServiceResult<()> {
        write(&self.events).insert(event.id, event);
        Ok(())
    }

    fn update(&self, event: EventTemplate) -> ServiceResult<()> {
        let mut events = write(&self.events);
        let slot = events
            .get_mut(&event.id)
            .ok_or_else(|| ServiceError::NotFound(format!("event {}", event.id)))?;
        *slot = event;
        Ok(())
    }

    fn delete(&self, id: EventId) -> ServiceResult<EventTemplate> {
        write(&self.events)
            .remove(&id)
            .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))
    }
}

impl MemberRepository for InMemoryStore {
    fn list(&self) -> ServiceResult<Vec<Member>> {
        let mut members: Vec<Member> = read(&self.members).values().cloned().collect();
        members.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(members)
    }

    fn get(&self, id: MemberId) -> ServiceResult<Option<Member>> {
        Ok(read(&self.members).get(&id).cloned())
    }

    fn get_many(&self, ids: &[MemberId]) -> ServiceResult<Vec<Member>> {
        let members = read(&self.members);
        Ok(ids.iter().filter_map(|id| members.get(id).cloned()).collect())
    }

    fn insert(&self, member: Member) -> ServiceResult<()> {
        write(&self.members).insert(member.id, member);
        Ok(())
    }

    fn update(&self, member: Member) -> ServiceResult<()> {
        let mut members = write(&self.members);
        let slot = members
            .get_mut(&member.id)
            .ok_or_else(|| ServiceError::NotFound(format!("member {}", member.id)))?;
        *slot = member;
        Ok(())
    }

    fn delete(&self, id: MemberId) -> ServiceResult<Member> {
        write(&self.members)
            .remove(&id)
            .ok_or_else(|| ServiceError::NotFound(format!("member {id}")))
    }

    fn upsert_all(&self, incoming: Vec<Member>) -> ServiceResult<()> {
        let mut members = write(&self.members);
        for member in incoming {
            members.insert(member.id, member);
        }
        Ok(())
    }
}
