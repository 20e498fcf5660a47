//! Construction of bounded recurrence definitions.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use flock_core::clock::Clock;
use flock_core::config::{CalendarConfig, HorizonMode};

use crate::error::CalendarResult;
use crate::frequency::{Cadence, Frequency};
use crate::window::parse_date;

/// Horizon length used when nothing else is configured.
pub const DEFAULT_HORIZON_DAYS: u16 = 30;

/// ## Summary
/// Cap on how far past its anchor a definition may generate occurrences.
///
/// The cap only keeps generation finite; it is unrelated to any end date the
/// event itself carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonPolicy {
    /// Same cap for every cadence.
    Flat { days: u16 },
    /// Daily 180, weekly 365, monthly 500, annually 1000 days.
    PerCadence,
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        Self::Flat {
            days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl HorizonPolicy {
    #[must_use]
    pub fn from_config(config: &CalendarConfig) -> Self {
        match config.horizon {
            HorizonMode::Flat => Self::Flat {
                days: config.horizon_days,
            },
            HorizonMode::PerCadence => Self::PerCadence,
        }
    }

    /// Horizon length in days for `cadence`.
    #[must_use]
    pub const fn days_for(self, cadence: Cadence) -> u16 {
        match self {
            Self::Flat { days } => days,
            Self::PerCadence => match cadence {
                Cadence::Daily => 180,
                Cadence::Weekly => 365,
                Cadence::Monthly => 500,
                Cadence::Annually => 1000,
            },
        }
    }

    /// Longest horizon any cadence can have under this policy.
    #[must_use]
    pub const fn longest(self) -> u16 {
        match self {
            Self::Flat { days } => days,
            Self::PerCadence => self.days_for(Cadence::Annually),
        }
    }
}

/// ## Summary
/// A bounded recurrence: anchor, optional cadence and absolute cutoff.
///
/// Built fresh for each expansion and never persisted. A definition without a
/// rule generates no occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceDefinition {
    pub anchor: NaiveDate,
    pub rule: Option<Cadence>,
    pub horizon: NaiveDate,
}

impl RecurrenceDefinition {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.rule.is_some()
    }
}

/// ## Summary
/// Builds [`RecurrenceDefinition`]s from an anchor and a frequency tag.
///
/// The clock is only consulted when the caller omits the anchor.
#[derive(Clone)]
pub struct RecurrenceRuleFactory {
    clock: Arc<dyn Clock>,
    policy: HorizonPolicy,
}

impl std::fmt::Debug for RecurrenceRuleFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecurrenceRuleFactory")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RecurrenceRuleFactory {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, policy: HorizonPolicy) -> Self {
        Self { clock, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> HorizonPolicy {
        self.policy
    }

    /// ## Summary
    /// Builds the definition for `frequency` anchored at `anchor`, or at the
    /// clock's current date when `anchor` is `None`.
    ///
    /// `Frequency::None` yields a definition with no rule whose horizon is
    /// the anchor itself.
    #[must_use]
    pub fn build(&self, anchor: Option<NaiveDate>, frequency: Frequency) -> RecurrenceDefinition {
        let anchor = anchor.unwrap_or_else(|| self.clock.today());
        let rule = frequency.cadence();
        let horizon_days = rule.map_or(0, |cadence| self.policy.days_for(cadence));
        let horizon = anchor
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        tracing::trace!(%anchor, ?rule, %horizon, "Built recurrence definition");

        RecurrenceDefinition {
            anchor,
            rule,
            horizon,
        }
    }

    /// ## Summary
    /// Boundary variant of [`Self::build`] for raw request values.
    ///
    /// The anchor is parsed strictly; the tag is normalized leniently, so an
    /// unknown tag produces an inactive definition.
    ///
    /// ## Errors
    /// Returns `CalendarError::InvalidArgument` if `anchor` is present but not
    /// a valid date.
    pub fn build_from_raw(
        &self,
        anchor: Option<&str>,
        tag: Option<&str>,
    ) -> CalendarResult<RecurrenceDefinition> {
        let anchor = anchor.map(parse_date).transpose()?;
        Ok(self.build(anchor, Frequency::from_tag(tag)))
    }
}
