//! Materialization of recurrence definitions into concrete occurrences.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::frequency::{Cadence, Frequency};
use crate::rule::{RecurrenceDefinition, RecurrenceRuleFactory};
use crate::window::DateWindow;

/// ## Summary
/// Maximum number of occurrences emitted per expansion (safety limit).
///
/// The horizon already bounds every loop; this only caps output size for
/// wide per-cadence horizons.
const DEFAULT_MAX_INSTANCES: usize = 10_000;

/// Read access to the fields of a stored event that expansion needs.
pub trait Schedulable {
    type Id: Clone;

    fn id(&self) -> Self::Id;
    fn description(&self) -> &str;
    fn frequency(&self) -> Frequency;
    /// Base start; its date anchors the recurrence and its time of day is
    /// carried onto every occurrence.
    fn start_time(&self) -> NaiveDateTime;
}

/// One materialized instance of a recurring event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence<Id> {
    pub source_id: Id,
    pub description: String,
    pub frequency: Frequency,
    pub occurrence_start: NaiveDateTime,
}

/// ## Summary
/// Expands recurrence definitions inside a closed date window.
///
/// Emitted dates satisfy `max(anchor, window.start) <= date <= min(horizon, window.end)`
/// and are strictly increasing. Expansion is pure: the same definition and
/// window always yield the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceExpander {
    max_instances: usize,
}

impl Default for OccurrenceExpander {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl OccurrenceExpander {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of instances.
    #[must_use]
    pub const fn with_max_instances(mut self, max: usize) -> Self {
        self.max_instances = max;
        self
    }

    /// ## Summary
    /// Returns the occurrence dates of `definition` that fall inside `window`.
    ///
    /// Inactive definitions, inverted windows and windows that miss the
    /// `[anchor, horizon]` span all yield an empty sequence.
    #[must_use]
    pub fn expand(&self, definition: &RecurrenceDefinition, window: &DateWindow) -> Vec<NaiveDate> {
        let Some(cadence) = definition.rule else {
            return Vec::new();
        };
        let bounds = window.clamp_to(definition.anchor, definition.horizon);
        if bounds.is_empty() {
            return Vec::new();
        }
        self.collect(cadence, definition.anchor, bounds)
    }

    /// Returns every occurrence date of `definition` up to its horizon.
    #[must_use]
    pub fn expand_to_horizon(&self, definition: &RecurrenceDefinition) -> Vec<NaiveDate> {
        self.expand(
            definition,
            &DateWindow::new(definition.anchor, definition.horizon),
        )
    }

    /// ## Summary
    /// Expands a stored event inside `window`.
    ///
    /// The event's own start date is the anchor. Each occurrence copies the
    /// event's id, description and frequency and keeps its time of day.
    #[tracing::instrument(skip(self, factory, template), fields(frequency = %template.frequency()))]
    pub fn expand_template<T: Schedulable>(
        &self,
        factory: &RecurrenceRuleFactory,
        template: &T,
        window: &DateWindow,
    ) -> Vec<Occurrence<T::Id>> {
        let start = template.start_time();
        let definition = factory.build(Some(start.date()), template.frequency());

        let occurrences: Vec<_> = self
            .expand(&definition, window)
            .into_iter()
            .map(|date| Occurrence {
                source_id: template.id(),
                description: template.description().to_owned(),
                frequency: template.frequency(),
                occurrence_start: date.and_time(start.time()),
            })
            .collect();

        tracing::debug!(count = occurrences.len(), "Expanded event template");
        occurrences
    }

    /// Steps from the anchor until the candidate passes `bounds.end`.
    fn collect(&self, cadence: Cadence, anchor: NaiveDate, bounds: DateWindow) -> Vec<NaiveDate> {
        let mut dates = Vec::new();

        for n in 0u32.. {
            let Some(candidate) = cadence.nth_after(anchor, n) else {
                break;
            };
            if candidate > bounds.end {
                break;
            }
            if candidate >= bounds.start {
                if dates.len() >= self.max_instances {
                    tracing::warn!(
                        max_instances = self.max_instances,
                        "Occurrence limit reached, truncating expansion"
                    );
                    break;
                }
                dates.push(candidate);
            }
        }

        dates
    }
}
