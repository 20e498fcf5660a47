use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Member, MemberId, NewMember};
use crate::repository::{EventRepository, MemberRepository};

/// ## Summary
/// Create, read, update and delete for single members.
///
/// Deleting a member also drops it from every event it was assigned to, so
/// events never point at a missing member.
pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    events: Arc<dyn EventRepository>,
}

impl MemberService {
    #[must_use]
    pub fn new(members: Arc<dyn MemberRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { members, events }
    }

    /// ## Errors
    /// Returns an error if the store cannot be read.
    pub fn list(&self) -> ServiceResult<Vec<Member>> {
        self.members.list()
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if the member does not exist.
    pub fn show(&self, id: MemberId) -> ServiceResult<Member> {
        self.members
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("member {id}")))
    }

    /// ## Errors
    /// Returns `ServiceError::ValidationError` for an invalid payload.
    #[tracing::instrument(skip(self, payload))]
    pub fn create(&self, payload: NewMember) -> ServiceResult<Member> {
        let member = payload.into_member(MemberId::generate())?;
        self.members.insert(member.clone())?;
        tracing::info!(member_id = %member.id, "Member created");
        Ok(member)
    }

    /// ## Summary
    /// Replaces every attribute of an existing member with the payload.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if the member does not exist, or
    /// `ServiceError::ValidationError` for an invalid payload.
    #[tracing::instrument(skip(self, payload))]
    pub fn update(&self, id: MemberId, payload: NewMember) -> ServiceResult<Member> {
        self.show(id)?;
        let member = payload.into_member(id)?;
        self.members.update(member.clone())?;
        tracing::info!(member_id = %id, "Member updated");
        Ok(member)
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if the member does not exist.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: MemberId) -> ServiceResult<Member> {
        let removed = self.members.delete(id)?;

        let mut detached = 0_usize;
        for mut event in self.events.list()? {
            if event.member_ids.contains(&id) {
                event.member_ids.retain(|member_id| *member_id != id);
                self.events.update(event)?;
                detached += 1;
            }
        }
        tracing::info!(member_id = %id, detached, "Member deleted");
        Ok(removed)
    }
}
