//! Builds the list of occurrences shown on a month calendar.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use flock_calendar::{
    DateWindow, HorizonPolicy, Occurrence, OccurrenceExpander, RecurrenceRuleFactory,
    resolve_month_window,
};
use flock_core::clock::Clock;
use flock_core::config::CalendarConfig;
use serde::Serialize;

use crate::error::ServiceResult;
use crate::model::{EventId, EventTemplate};
use crate::repository::EventRepository;

pub type EventOccurrence = Occurrence<EventId>;

/// Occurrences visible in one month grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub query_date: NaiveDate,
    pub window: DateWindow,
    pub occurrences: Vec<EventOccurrence>,
}

impl MonthView {
    /// Occurrences grouped by calendar day; days without events are omitted.
    #[must_use]
    pub fn by_day(&self) -> BTreeMap<NaiveDate, Vec<&EventOccurrence>> {
        let mut days: BTreeMap<NaiveDate, Vec<&EventOccurrence>> = BTreeMap::new();
        for occurrence in &self.occurrences {
            days.entry(occurrence.occurrence_start.date())
                .or_default()
                .push(occurrence);
        }
        days
    }

    /// Every day of the window split into rows of seven.
    #[must_use]
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        let days: Vec<NaiveDate> = self
            .window
            .start
            .iter_days()
            .take_while(|day| *day <= self.window.end)
            .collect();
        days.chunks(7).map(<[NaiveDate]>::to_vec).collect()
    }
}

/// ## Summary
/// Resolves a month window, fetches the events that can appear in it and
/// flattens their occurrences into one chronological list.
pub struct CalendarService {
    events: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
    factory: RecurrenceRuleFactory,
    expander: OccurrenceExpander,
    week_start: Weekday,
}

impl CalendarService {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        clock: Arc<dyn Clock>,
        policy: HorizonPolicy,
        week_start: Weekday,
    ) -> Self {
        Self {
            events,
            factory: RecurrenceRuleFactory::new(Arc::clone(&clock), policy),
            clock,
            expander: OccurrenceExpander::new(),
            week_start,
        }
    }

    #[must_use]
    pub fn from_config(
        events: Arc<dyn EventRepository>,
        clock: Arc<dyn Clock>,
        config: &CalendarConfig,
    ) -> Self {
        Self::new(
            events,
            clock,
            HorizonPolicy::from_config(config),
            config.week_start.weekday(),
        )
    }

    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// ## Summary
    /// Builds the month view for the month containing `query_date`, or the
    /// clock's current month when `None`.
    ///
    /// ## Errors
    /// Returns an error if the window cannot be resolved or the repository
    /// cannot be read.
    #[tracing::instrument(skip(self))]
    pub fn month(&self, query_date: Option<NaiveDate>) -> ServiceResult<MonthView> {
        let query_date = query_date.unwrap_or_else(|| self.clock.today());
        let window = self.window_for(Some(query_date))?;
        let occurrences = self.occurrences_in(&window)?;

        Ok(MonthView {
            query_date,
            window,
            occurrences,
        })
    }

    /// ## Summary
    /// Resolves the month grid containing `date`, or the clock's current month
    /// when `None`.
    ///
    /// ## Errors
    /// Returns an error if the grid falls outside the supported date range.
    pub fn window_for(&self, date: Option<NaiveDate>) -> ServiceResult<DateWindow> {
        let date = date.unwrap_or_else(|| self.clock.today());
        Ok(resolve_month_window(date, self.week_start)?)
    }

    /// ## Summary
    /// Every occurrence visible inside `window`, ordered by
    /// `(occurrence_start, source_id)`.
    ///
    /// Recurring events are fetched with the window extended back by the
    /// longest horizon, since an event that started before the window can
    /// still recur inside it. Non-recurring events appear once, on their own
    /// start, when that start is inside the window.
    ///
    /// ## Errors
    /// Returns an error if the repository cannot be read.
    pub fn occurrences_in(&self, window: &DateWindow) -> ServiceResult<Vec<EventOccurrence>> {
        let lookup = window.extend_back(self.factory.policy().longest());
        let templates = self.events.find_events_overlapping(&lookup)?;
        tracing::debug!(
            templates = templates.len(),
            window_start = %window.start,
            window_end = %window.end,
            "Expanding events for window"
        );

        let mut occurrences: Vec<EventOccurrence> = templates
            .iter()
            .flat_map(|template| self.occurrences_of(template, window))
            .collect();
        occurrences.sort_by(|a, b| {
            (a.occurrence_start, a.source_id).cmp(&(b.occurrence_start, b.source_id))
        });
        Ok(occurrences)
    }

    fn occurrences_of(&self, template: &EventTemplate, window: &DateWindow) -> Vec<EventOccurrence> {
        if template.frequency.is_recurring() {
            return self.expander.expand_template(&self.factory, template, window);
        }
        if window.contains(template.start_time.date()) {
            return vec![Occurrence {
                source_id: template.id,
                description: template.description.clone(),
                frequency: template.frequency,
                occurrence_start: template.start_time,
            }];
        }
        Vec::new()
    }
}
