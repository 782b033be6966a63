//! Day Pairer: groups normalized events by calendar day and derives the
//! entrance/exit boundaries, meal intervals and net worked seconds.

use crate::models::event::AttendanceEvent;
use crate::models::event_kind::EventKind;
use crate::models::report::{DailyWorked, DayBounds, MealInterval};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Everything the pairer derives for one calendar day.
#[derive(Debug, Clone)]
pub struct PairedDay {
    pub bounds: DayBounds,
    pub meals: Vec<MealInterval>,
}

impl PairedDay {
    pub fn meal_seconds(&self) -> i64 {
        self.meals.iter().map(MealInterval::seconds).sum()
    }

    /// Net worked seconds, or `None` for an open/incomplete day.
    pub fn worked_seconds(&self) -> Option<i64> {
        match (self.bounds.entrance_time, self.bounds.exit_time) {
            (Some(entrance), Some(exit)) if exit >= entrance => {
                let span = (exit - entrance).num_seconds();
                Some((span - self.meal_seconds()).max(0))
            }
            _ => None,
        }
    }
}

/// Pair the events of one person. Events of other people, and events on
/// dates outside whatever range the caller fetched, are the caller's
/// problem: the pairer only groups what it is given.
///
/// Returned days are ordered by ascending date.
pub fn pair_days(events: &[AttendanceEvent]) -> Vec<PairedDay> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&AttendanceEvent>> = BTreeMap::new();
    for ev in events {
        if ev.kind.counts_for_duration() {
            by_date.entry(ev.date).or_default().push(ev);
        }
    }

    by_date
        .into_iter()
        .map(|(date, day_events)| pair_one_day(date, &day_events))
        .collect()
}

/// `DailyWorked` rows for every complete day. Incomplete days are simply
/// omitted; that is an exclusion, not an error.
pub fn daily_worked(events: &[AttendanceEvent]) -> Vec<DailyWorked> {
    pair_days(events)
        .into_iter()
        .filter_map(|day| {
            let worked_seconds = day.worked_seconds()?;
            Some(DailyWorked {
                person_id: day.bounds.person_id,
                date: day.bounds.date,
                worked_seconds,
            })
        })
        .collect()
}

fn pair_one_day(date: NaiveDate, events: &[&AttendanceEvent]) -> PairedDay {
    let person_id = events.first().map(|e| e.person_id).unwrap_or(0);

    let entrance_time = events
        .iter()
        .filter(|e| e.kind == EventKind::Entrance)
        .map(|e| e.time)
        .min();
    let exit_time = events
        .iter()
        .filter(|e| e.kind == EventKind::Exit)
        .map(|e| e.time)
        .max();

    // Meal pairing: each MealOut (ascending) takes the earliest MealIn at
    // or after it that no earlier MealOut already consumed.
    let mut outs: Vec<_> = events
        .iter()
        .filter(|e| e.kind == EventKind::MealOut)
        .map(|e| e.time)
        .collect();
    outs.sort();

    let mut ins: Vec<_> = events
        .iter()
        .filter(|e| e.kind == EventKind::MealIn)
        .map(|e| e.time)
        .collect();
    ins.sort();

    let mut used = vec![false; ins.len()];
    let meals = outs
        .into_iter()
        .map(|out| {
            let matched = ins
                .iter()
                .enumerate()
                .find(|(i, t)| !used[*i] && **t >= out)
                .map(|(i, t)| {
                    used[i] = true;
                    *t
                });
            MealInterval {
                meal_out_time: out,
                meal_in_time: matched,
            }
        })
        .collect();

    PairedDay {
        bounds: DayBounds {
            person_id,
            date,
            entrance_time,
            exit_time,
        },
        meals,
    }
}
