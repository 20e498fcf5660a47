//! Congregation members.

use serde::{Deserialize, Serialize};

use super::to_sentence;
use crate::error::{ServiceError, ServiceResult};

super::uuid_id! {
    /// Stable identifier of a member.
    MemberId
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Member {
    /// An unsaved member with only an id.
    #[must_use]
    pub fn blank(id: MemberId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
        }
    }

    /// ## Summary
    /// Assigns one attribute by column name.
    ///
    /// Returns `false` when `name` is not a member attribute. Blank optional
    /// values clear the attribute.
    pub fn assign(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        let optional = (!value.is_empty()).then(|| value.to_string());
        match name {
            "first_name" => self.first_name = value.to_string(),
            "last_name" => self.last_name = value.to_string(),
            "email" => self.email = optional,
            "phone" => self.phone = optional,
            _ => return false,
        }
        true
    }

    /// Returns one message per failed rule; empty when valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push("First name can't be blank".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name can't be blank".to_string());
        }
        if self.email.as_deref().is_some_and(|email| !email.contains('@')) {
            errors.push("Email is invalid".to_string());
        }
        errors
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create/update payload for a single member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMember {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewMember {
    /// ## Summary
    /// Builds the member stored under `id` from this payload. Every attribute
    /// is replaced; absent optional fields are cleared.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` with every failed rule joined
    /// into one sentence.
    pub fn into_member(self, id: MemberId) -> ServiceResult<Member> {
        let mut member = Member::blank(id);
        for (name, value) in [
            ("first_name", self.first_name),
            ("last_name", self.last_name),
            ("email", self.email),
            ("phone", self.phone),
        ] {
            member.assign(name, value.as_deref().unwrap_or_default());
        }

        let errors = member.validation_errors();
        if errors.is_empty() {
            Ok(member)
        } else {
            Err(ServiceError::ValidationError(to_sentence(&errors)))
        }
    }
}
