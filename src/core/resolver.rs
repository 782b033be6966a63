//! Schedule Resolver: maps calendar dates to the expected window of the
//! person's assigned shift template.

use crate::models::report::DailyScheduled;
use crate::models::schedule::ShiftTemplate;
use chrono::NaiveDate;

/// Expected seconds for one date, or `None` when the person has no
/// template or the weekday is not scheduled.
pub fn scheduled_seconds_for(template: Option<&ShiftTemplate>, date: NaiveDate) -> Option<i64> {
    template?.window_for(date)?.scheduled_seconds()
}

/// `DailyScheduled` rows for the given dates. Unscheduled dates are
/// omitted, mirroring how incomplete days drop out of the worked side.
pub fn daily_scheduled(
    person_id: i64,
    template: Option<&ShiftTemplate>,
    dates: &[NaiveDate],
) -> Vec<DailyScheduled> {
    dates
        .iter()
        .filter_map(|&date| {
            let scheduled_seconds = scheduled_seconds_for(template, date)?;
            Some(DailyScheduled {
                person_id,
                date,
                scheduled_seconds,
            })
        })
        .collect()
}
