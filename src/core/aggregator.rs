//! Week Aggregator: buckets daily worked/scheduled rows by ISO week and
//! derives overtime and day-compliance per (person, week).

use crate::models::report::{DailyScheduled, DailyWorked, IsoWeek, WeeklyReportRow};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct WeekBucket {
    worked_seconds: i64,
    scheduled_seconds: i64,
    days_worked: u32,
}

/// Merge worked and scheduled day rows into weekly report rows.
///
/// The two inputs are independently keyed; the merge is a full outer join
/// on (person, week) with the missing side defaulted to 0, so a week with
/// only scheduled time (no events yet) still appears with zero worked
/// seconds. `days_scheduled` is the template's configured constant, not a
/// per-week observation.
///
/// Rows come back ordered by descending week, then person.
pub fn weekly_report(
    worked: &[DailyWorked],
    scheduled: &[DailyScheduled],
    days_scheduled: u32,
) -> Vec<WeeklyReportRow> {
    let mut buckets: BTreeMap<(i64, IsoWeek), WeekBucket> = BTreeMap::new();

    for d in worked {
        let b = buckets
            .entry((d.person_id, IsoWeek::of(d.date)))
            .or_default();
        b.worked_seconds += d.worked_seconds;
        if d.worked_seconds > 0 {
            // daily_worked emits at most one row per date
            b.days_worked += 1;
        }
    }

    for d in scheduled {
        let b = buckets
            .entry((d.person_id, IsoWeek::of(d.date)))
            .or_default();
        b.scheduled_seconds += d.scheduled_seconds;
    }

    let mut rows: Vec<WeeklyReportRow> = buckets
        .into_iter()
        .map(|((person_id, iso_week), b)| WeeklyReportRow {
            person_id,
            iso_week,
            worked_seconds: b.worked_seconds,
            scheduled_seconds: b.scheduled_seconds,
            overtime_seconds: (b.worked_seconds - b.scheduled_seconds).max(0),
            days_worked: b.days_worked,
            days_scheduled,
            compliance_pct: compliance_pct(b.days_worked, days_scheduled),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.iso_week
            .cmp(&a.iso_week)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    rows
}

/// Ratio of days with positive worked time to the configured expected
/// working-day count, rounded to one decimal. Uncapped: working more days
/// than scheduled reads above 100.
fn compliance_pct(days_worked: u32, days_scheduled: u32) -> Option<f64> {
    if days_scheduled == 0 {
        return None;
    }
    let pct = 100.0 * f64::from(days_worked) / f64::from(days_scheduled);
    Some((pct * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn w(date: &str, secs: i64) -> DailyWorked {
        DailyWorked {
            person_id: 7,
            date: d(date),
            worked_seconds: secs,
        }
    }

    fn s(date: &str, secs: i64) -> DailyScheduled {
        DailyScheduled {
            person_id: 7,
            date: d(date),
            scheduled_seconds: secs,
        }
    }

    #[test]
    fn overtime_without_template_equals_worked() {
        let rows = weekly_report(&[w("2025-09-01", 30_600)], &[], 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worked_seconds, 30_600);
        assert_eq!(rows[0].scheduled_seconds, 0);
        assert_eq!(rows[0].overtime_seconds, 30_600);
        assert_eq!(rows[0].compliance_pct, None);
    }

    #[test]
    fn overtime_against_template_is_the_difference() {
        let rows = weekly_report(&[w("2025-09-01", 30_600)], &[s("2025-09-01", 28_800)], 5);
        assert_eq!(rows[0].overtime_seconds, 1_800);
        assert_eq!(rows[0].compliance_pct, Some(20.0));
    }

    #[test]
    fn overtime_is_never_negative() {
        let rows = weekly_report(&[w("2025-09-01", 10_000)], &[s("2025-09-01", 28_800)], 5);
        assert_eq!(rows[0].overtime_seconds, 0);
    }

    #[test]
    fn scheduled_only_weeks_still_appear() {
        let rows = weekly_report(&[], &[s("2025-09-01", 28_800), s("2025-09-02", 28_800)], 5);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worked_seconds, 0);
        assert_eq!(rows[0].scheduled_seconds, 57_600);
        assert_eq!(rows[0].days_worked, 0);
        assert_eq!(rows[0].compliance_pct, Some(0.0));
    }

    #[test]
    fn weeks_are_ordered_descending() {
        let rows = weekly_report(
            &[w("2025-09-01", 3600), w("2025-09-08", 3600), w("2025-08-25", 3600)],
            &[],
            0,
        );
        let weeks: Vec<u32> = rows.iter().map(|r| r.iso_week.week).collect();
        assert_eq!(weeks, vec![37, 36, 35]);
    }

    #[test]
    fn iso_week_boundary_splits_sunday_and_monday() {
        // 2025-09-07 is a Sunday, 2025-09-08 the next Monday
        let rows = weekly_report(&[w("2025-09-07", 3600), w("2025-09-08", 3600)], &[], 0);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn compliance_can_exceed_one_hundred() {
        let worked: Vec<DailyWorked> = (1..=6)
            .map(|day| w(&format!("2025-09-0{day}"), 3600))
            .collect();
        let rows = weekly_report(&worked, &[], 5);
        assert_eq!(rows[0].compliance_pct, Some(120.0));
    }

    #[test]
    fn compliance_rounds_to_one_decimal() {
        let worked = vec![w("2025-09-01", 3600), w("2025-09-02", 3600)];
        let rows = weekly_report(&worked, &[], 3);
        assert_eq!(rows[0].compliance_pct, Some(66.7));
    }

    #[test]
    fn people_are_bucketed_independently() {
        let mut other = w("2025-09-01", 7200);
        other.person_id = 9;
        let rows = weekly_report(&[w("2025-09-01", 3600), other], &[], 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].person_id, 7);
        assert_eq!(rows[1].person_id, 9);
    }
}
