//! Attendance reconciliation engine.
//!
//! Pure computation over already-fetched rows: the engine performs no I/O
//! and holds no state, so callers may run it per person on any thread.

pub mod aggregator;
pub mod pairer;
pub mod resolver;

use crate::models::event::AttendanceEvent;
use crate::models::report::{DailyScheduled, DailyWorked, WeeklyReportRow};
use crate::models::schedule::ShiftTemplate;
use chrono::NaiveDate;

/// Result of one reconciliation pass for a single person.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub days: Vec<pairer::PairedDay>,
    pub worked: Vec<DailyWorked>,
    pub scheduled: Vec<DailyScheduled>,
    pub weekly: Vec<WeeklyReportRow>,
}

pub struct Engine;

impl Engine {
    /// Run the whole pipeline: normalize → pair days → resolve schedule →
    /// aggregate weeks. Scheduled rows cover every date of the requested
    /// range, so a week the template expects work in still appears when
    /// no events were recorded for it.
    pub fn reconcile(
        person_id: i64,
        events: &[AttendanceEvent],
        template: Option<&ShiftTemplate>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Reconciliation {
        let days = pairer::pair_days(events);
        let worked = pairer::daily_worked(events);

        let dates: Vec<NaiveDate> = from.iter_days().take_while(|d| *d <= to).collect();
        let scheduled = resolver::daily_scheduled(person_id, template, &dates);

        let days_scheduled = template.map(ShiftTemplate::days_scheduled).unwrap_or(0);
        let weekly = aggregator::weekly_report(&worked, &scheduled, days_scheduled);

        Reconciliation {
            days,
            worked,
            scheduled,
            weekly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::DayWindow;
    use chrono::NaiveTime;

    fn ev(date: &str, time: &str, motive: &str) -> AttendanceEvent {
        AttendanceEvent::new(
            7,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            motive,
            None,
            false,
            "",
        )
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn office_window() -> DayWindow {
        DayWindow {
            entrance: t(9, 0),
            exit: t(18, 0),
            meal_start: Some(t(13, 0)),
            meal_end: Some(t(14, 0)),
        }
    }

    fn weekday_template() -> ShiftTemplate {
        let win = office_window();
        ShiftTemplate {
            id: 1,
            name: "Office".into(),
            active: true,
            days: [Some(win), Some(win), Some(win), Some(win), Some(win), None, None],
        }
    }

    #[test]
    fn full_pipeline_reconciles_one_day() {
        // Mon 09:00-18:00 with 13:00-14:00 meal -> 28800 s scheduled
        let tpl = ShiftTemplate {
            id: 1,
            name: "Office".into(),
            active: true,
            days: [Some(office_window()), None, None, None, None, None, None],
        };

        // Monday 2025-09-01: worked 30600 s
        let events = vec![
            ev("2025-09-01", "08:00", "entrada"),
            ev("2025-09-01", "13:00", "salida de comida"),
            ev("2025-09-01", "13:30", "entrada de comida"),
            ev("2025-09-01", "17:00", "salida"),
        ];

        let rec = Engine::reconcile(7, &events, Some(&tpl), d("2025-09-01"), d("2025-09-01"));
        assert_eq!(rec.worked[0].worked_seconds, 30_600);
        assert_eq!(rec.scheduled[0].scheduled_seconds, 28_800);
        assert_eq!(rec.weekly.len(), 1);
        assert_eq!(rec.weekly[0].overtime_seconds, 1_800);
        assert_eq!(rec.weekly[0].days_scheduled, 1);
        assert_eq!(rec.weekly[0].compliance_pct, Some(100.0));
    }

    #[test]
    fn no_template_reconciliation_has_null_compliance() {
        let events = vec![
            ev("2025-09-01", "08:00", "entrada"),
            ev("2025-09-01", "17:00", "salida"),
        ];
        let rec = Engine::reconcile(7, &events, None, d("2025-09-01"), d("2025-09-07"));
        assert!(rec.scheduled.is_empty());
        assert_eq!(rec.weekly[0].overtime_seconds, rec.weekly[0].worked_seconds);
        assert_eq!(rec.weekly[0].compliance_pct, None);
    }

    #[test]
    fn empty_range_with_template_still_yields_the_week() {
        // No events at all: the scheduled side alone must anchor the week.
        let tpl = weekday_template();
        let rec = Engine::reconcile(7, &[], Some(&tpl), d("2025-09-01"), d("2025-09-07"));
        assert_eq!(rec.weekly.len(), 1);
        assert_eq!(rec.weekly[0].worked_seconds, 0);
        assert_eq!(rec.weekly[0].scheduled_seconds, 5 * 28_800);
        assert_eq!(rec.weekly[0].overtime_seconds, 0);
        assert_eq!(rec.weekly[0].compliance_pct, Some(0.0));
    }

    #[test]
    fn scheduled_side_covers_the_whole_range_not_just_event_dates() {
        // One worked Monday against a Mon-Fri template: the other four
        // scheduled days still count, so there is no overtime.
        let tpl = weekday_template();
        let events = vec![
            ev("2025-09-01", "08:00", "entrada"),
            ev("2025-09-01", "17:00", "salida"),
        ];
        let rec = Engine::reconcile(7, &events, Some(&tpl), d("2025-09-01"), d("2025-09-07"));
        assert_eq!(rec.weekly.len(), 1);
        assert_eq!(rec.weekly[0].worked_seconds, 32_400);
        assert_eq!(rec.weekly[0].scheduled_seconds, 144_000);
        assert_eq!(rec.weekly[0].overtime_seconds, 0);
    }
}
