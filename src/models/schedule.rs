use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

/// Expected entrance/exit (and optional meal window) for one weekday.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DayWindow {
    pub entrance: NaiveTime,
    pub exit: NaiveTime,
    pub meal_start: Option<NaiveTime>,
    pub meal_end: Option<NaiveTime>,
}

impl DayWindow {
    /// Seconds the window expects to be worked: span minus the meal window.
    /// A window whose exit does not come after its entrance counts as
    /// unscheduled, matching how templates with bogus hours are ignored.
    pub fn scheduled_seconds(&self) -> Option<i64> {
        if self.exit <= self.entrance {
            return None;
        }
        let span = (self.exit - self.entrance).num_seconds();
        let meal = match (self.meal_start, self.meal_end) {
            (Some(s), Some(e)) if e > s => (e - s).num_seconds(),
            _ => 0,
        };
        Some((span - meal).max(0))
    }
}

/// A named, reusable weekly schedule assigned to zero or more people.
///
/// The seven slots are indexed Monday=0 .. Sunday=6. This is the single
/// weekday convention of the whole crate; callers convert dates through
/// [`weekday_index`] and never re-derive their own numbering.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftTemplate {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub days: [Option<DayWindow>; 7],
}

/// Monday=0 .. Sunday=6 slot index for a calendar date.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

impl ShiftTemplate {
    /// The window expected on the given calendar date, if that weekday is
    /// scheduled at all.
    pub fn window_for(&self, date: NaiveDate) -> Option<&DayWindow> {
        self.days[weekday_index(date)].as_ref()
    }

    /// Count of weekdays that actually expect work. This is the fixed
    /// "expected working days per week" used as the compliance denominator
    /// for every week in a report. An inverted window (exit ≤ entrance)
    /// never contributes scheduled seconds, so it does not count here
    /// either.
    pub fn days_scheduled(&self) -> u32 {
        self.days
            .iter()
            .flatten()
            .filter(|w| w.scheduled_seconds().is_some())
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn weekday_index_is_monday_zero_sunday_six() {
        // 2025-09-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(weekday_index(monday), 0);
        assert_eq!(weekday_index(monday + chrono::Days::new(5)), 5); // Saturday
        assert_eq!(weekday_index(monday + chrono::Days::new(6)), 6); // Sunday
    }

    #[test]
    fn scheduled_seconds_subtracts_meal_window() {
        let w = DayWindow {
            entrance: t(9, 0),
            exit: t(18, 0),
            meal_start: Some(t(13, 0)),
            meal_end: Some(t(14, 0)),
        };
        assert_eq!(w.scheduled_seconds(), Some(28_800));
    }

    #[test]
    fn half_defined_meal_window_counts_as_no_meal() {
        let w = DayWindow {
            entrance: t(9, 0),
            exit: t(17, 0),
            meal_start: Some(t(13, 0)),
            meal_end: None,
        };
        assert_eq!(w.scheduled_seconds(), Some(28_800));
    }

    #[test]
    fn inverted_window_is_not_scheduled() {
        let w = DayWindow {
            entrance: t(18, 0),
            exit: t(9, 0),
            meal_start: None,
            meal_end: None,
        };
        assert_eq!(w.scheduled_seconds(), None);
    }

    #[test]
    fn days_scheduled_counts_configured_slots() {
        let win = DayWindow {
            entrance: t(9, 0),
            exit: t(17, 0),
            meal_start: None,
            meal_end: None,
        };
        let tpl = ShiftTemplate {
            id: 1,
            name: "Office".into(),
            active: true,
            days: [Some(win), Some(win), Some(win), Some(win), Some(win), None, None],
        };
        assert_eq!(tpl.days_scheduled(), 5);
    }

    #[test]
    fn inverted_window_is_excluded_from_the_compliance_denominator() {
        let win = DayWindow {
            entrance: t(9, 0),
            exit: t(17, 0),
            meal_start: None,
            meal_end: None,
        };
        let inverted = DayWindow {
            entrance: t(18, 0),
            exit: t(9, 0),
            meal_start: None,
            meal_end: None,
        };
        let tpl = ShiftTemplate {
            id: 1,
            name: "Odd".into(),
            active: true,
            days: [Some(win), Some(inverted), None, None, None, None, None],
        };
        assert_eq!(tpl.days_scheduled(), 1);
    }
}
