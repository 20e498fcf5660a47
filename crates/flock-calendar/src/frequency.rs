//! Event frequency tags and the cadences they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Recurrence tag stored on an event.
///
/// `None` covers both an absent and an empty tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(alias = "", alias = "none")]
    None,
    #[serde(alias = "daily")]
    Daily,
    #[serde(alias = "weekly")]
    Weekly,
    #[serde(alias = "monthly")]
    Monthly,
    #[serde(alias = "annually")]
    Annually,
}

/// Step unit of an active recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Annually,
}

impl Frequency {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Annually,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Annually => "Annually",
        }
    }

    /// Cadence of the rule this tag attaches, if any.
    #[must_use]
    pub const fn cadence(self) -> Option<Cadence> {
        match self {
            Self::None => None,
            Self::Daily => Some(Cadence::Daily),
            Self::Weekly => Some(Cadence::Weekly),
            Self::Monthly => Some(Cadence::Monthly),
            Self::Annually => Some(Cadence::Annually),
        }
    }

    #[must_use]
    pub const fn is_recurring(self) -> bool {
        self.cadence().is_some()
    }

    /// ## Summary
    /// Lenient conversion used for already-stored tags.
    ///
    /// Absent, empty and unrecognized tags all become [`Frequency::None`].
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::None;
        };
        tag.parse().unwrap_or_else(|err| {
            tracing::warn!(tag = %tag, error = %err, "Unrecognized frequency tag, treating as non-recurring");
            Self::None
        })
    }
}

impl FromStr for Frequency {
    type Err = CalendarError;

    /// Strict parse. Matching is case-insensitive and ignores surrounding
    /// whitespace; the empty string is `None`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(tag))
            .or_else(|| tag.eq_ignore_ascii_case("none").then_some(Self::None))
            .ok_or_else(|| CalendarError::InvalidArgument(format!("unknown frequency '{tag}'")))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Cadence> for Frequency {
    fn from(cadence: Cadence) -> Self {
        match cadence {
            Cadence::Daily => Self::Daily,
            Cadence::Weekly => Self::Weekly,
            Cadence::Monthly => Self::Monthly,
            Cadence::Annually => Self::Annually,
        }
    }
}
