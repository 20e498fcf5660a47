use std::sync::Arc;

use chrono::NaiveDate;
use flock_core::clock::FixedClock;

use crate::expand::OccurrenceExpander;
use crate::frequency::Frequency;
use crate::rule::{HorizonPolicy, RecurrenceRuleFactory};
use crate::window::DateWindow;

pub struct RecurrenceCase {
    pub name: &'static str,
    pub anchor: &'static str,
    pub frequency: Frequency,
    pub policy: HorizonPolicy,
    pub window_start: &'static str,
    pub window_end: &'static str,
    pub expected: &'static [&'static str],
}

const FLAT: HorizonPolicy = HorizonPolicy::Flat { days: 30 };

#[expect(clippy::too_many_lines)]
pub fn recurrence_cases() -> Vec<RecurrenceCase> {
    vec![
        RecurrenceCase {
            name: "weekly_july",
            anchor: "2021-07-17",
            frequency: Frequency::Weekly,
            policy: FLAT,
            window_start: "2021-07-01",
            window_end: "2021-07-31",
            expected: &["2021-07-17", "2021-07-24", "2021-07-31"],
        },
        RecurrenceCase {
            name: "monthly_month_end_flat",
            anchor: "2021-01-31",
            frequency: Frequency::Monthly,
            policy: FLAT,
            window_start: "2021-01-01",
            window_end: "2021-03-31",
            expected: &["2021-01-31", "2021-02-28"],
        },
        RecurrenceCase {
            name: "monthly_month_end_per_cadence",
            anchor: "2021-01-31",
            frequency: Frequency::Monthly,
            policy: HorizonPolicy::PerCadence,
            window_start: "2021-01-01",
            window_end: "2021-03-31",
            expected: &["2021-01-31", "2021-02-28", "2021-03-31"],
        },
        RecurrenceCase {
            name: "monthly_leap_february",
            anchor: "2020-01-31",
            frequency: Frequency::Monthly,
            policy: FLAT,
            window_start: "2020-01-01",
            window_end: "2020-03-31",
            expected: &["2020-01-31", "2020-02-29"],
        },
        RecurrenceCase {
            name: "monthly_30th_per_cadence",
            anchor: "2010-01-30",
            frequency: Frequency::Monthly,
            policy: HorizonPolicy::PerCadence,
            window_start: "2010-01-01",
            window_end: "2010-04-30",
            expected: &["2010-01-30", "2010-02-28", "2010-03-30", "2010-04-30"],
        },
        RecurrenceCase {
            name: "none_frequency",
            anchor: "2021-07-17",
            frequency: Frequency::None,
            policy: HorizonPolicy::PerCadence,
            window_start: "2000-01-01",
            window_end: "2099-12-31",
            expected: &[],
        },
        RecurrenceCase {
            name: "inverted_window",
            anchor: "2021-07-17",
            frequency: Frequency::Weekly,
            policy: FLAT,
            window_start: "2021-08-01",
            window_end: "2021-07-01",
            expected: &[],
        },
        RecurrenceCase {
            name: "anchor_after_window",
            anchor: "2021-09-01",
            frequency: Frequency::Weekly,
            policy: FLAT,
            window_start: "2021-07-01",
            window_end: "2021-07-31",
            expected: &[],
        },
        RecurrenceCase {
            name: "horizon_before_window",
            anchor: "2021-05-01",
            frequency: Frequency::Daily,
            policy: FLAT,
            window_start: "2021-07-01",
            window_end: "2021-07-31",
            expected: &[],
        },
        RecurrenceCase {
            name: "daily_runs_to_window_end",
            anchor: "2021-07-25",
            frequency: Frequency::Daily,
            policy: FLAT,
            window_start: "2021-07-01",
            window_end: "2021-07-31",
            expected: &[
                "2021-07-25",
                "2021-07-26",
                "2021-07-27",
                "2021-07-28",
                "2021-07-29",
                "2021-07-30",
                "2021-07-31",
            ],
        },
        RecurrenceCase {
            name: "weekly_anchor_before_window",
            anchor: "2021-06-20",
            frequency: Frequency::Weekly,
            policy: FLAT,
            window_start: "2021-07-01",
            window_end: "2021-07-31",
            expected: &["2021-07-04", "2021-07-11", "2021-07-18"],
        },
        RecurrenceCase {
            name: "annual_flat_single",
            anchor: "2021-07-17",
            frequency: Frequency::Annually,
            policy: FLAT,
            window_start: "2021-01-01",
            window_end: "2023-12-31",
            expected: &["2021-07-17"],
        },
        RecurrenceCase {
            name: "annual_leap_day_per_cadence",
            anchor: "2008-02-29",
            frequency: Frequency::Annually,
            policy: HorizonPolicy::PerCadence,
            window_start: "2008-01-01",
            window_end: "2011-12-31",
            expected: &["2008-02-29", "2009-02-28", "2010-02-28"],
        },
        RecurrenceCase {
            name: "single_day_window",
            anchor: "2021-07-17",
            frequency: Frequency::Weekly,
            policy: FLAT,
            window_start: "2021-07-24",
            window_end: "2021-07-24",
            expected: &["2021-07-24"],
        },
    ]
}

fn parse(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("case dates are valid")
}

pub fn assert_case(case: &RecurrenceCase) {
    let factory = RecurrenceRuleFactory::new(Arc::new(FixedClock(parse("2000-01-01"))), case.policy);
    let definition = factory.build(Some(parse(case.anchor)), case.frequency);
    let window = DateWindow::new(parse(case.window_start), parse(case.window_end));

    let actual = OccurrenceExpander::new().expand(&definition, &window);
    let expected: Vec<NaiveDate> = case.expected.iter().map(|value| parse(value)).collect();

    assert_eq!(actual, expected, "case {} failed", case.name);
}
