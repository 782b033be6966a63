//! Derived structures produced by the reconciliation engine.
//! None of these are stored; they are recomputed from events and templates
//! on every call.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Entrance/exit boundaries of one calendar day.
/// A day missing either side is open/incomplete: it still shows up in the
/// history but contributes no worked seconds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayBounds {
    pub person_id: i64,
    pub date: NaiveDate,
    pub entrance_time: Option<NaiveTime>,
    pub exit_time: Option<NaiveTime>,
}

impl DayBounds {
    pub fn is_complete(&self) -> bool {
        matches!(
            (self.entrance_time, self.exit_time),
            (Some(e), Some(x)) if x >= e
        )
    }
}

/// One meal break: a MealOut paired with the earliest matching MealIn.
/// An unpaired MealOut keeps `meal_in_time = None` and counts zero seconds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MealInterval {
    pub meal_out_time: NaiveTime,
    pub meal_in_time: Option<NaiveTime>,
}

impl MealInterval {
    pub fn seconds(&self) -> i64 {
        match self.meal_in_time {
            Some(t) => (t - self.meal_out_time).num_seconds().max(0),
            None => 0,
        }
    }
}

/// Net worked seconds of one complete day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyWorked {
    pub person_id: i64,
    pub date: NaiveDate,
    pub worked_seconds: i64,
}

/// Seconds the assigned template expects for one date.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyScheduled {
    pub person_id: i64,
    pub date: NaiveDate,
    pub scheduled_seconds: i64,
}

/// ISO-8601 year/week pair (Monday-start).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl IsoWeek {
    pub fn of(date: NaiveDate) -> Self {
        let iw = chrono::Datelike::iso_week(&date);
        Self {
            year: iw.year(),
            week: iw.week(),
        }
    }
}

impl std::fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// One (person, ISO week) row of the weekly report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyReportRow {
    pub person_id: i64,
    pub iso_week: IsoWeek,
    pub worked_seconds: i64,
    pub scheduled_seconds: i64,
    pub overtime_seconds: i64,
    pub days_worked: u32,
    pub days_scheduled: u32,
    /// `None` when the person has no scheduled weekdays; may exceed 100.0
    /// when more days were worked than scheduled.
    pub compliance_pct: Option<f64>,
}
