//! Time utilities: parsing HH:MM[:SS], shift-window syntax, formatting
//! seconds, etc.

use crate::errors::{AppError, AppResult};
use crate::models::schedule::DayWindow;
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

pub fn seconds_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_seconds()
}

/// "HH:MM" rendering of a seconds total (sign-aware).
pub fn format_seconds(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}:{:02}", sign, s / 3600, (s % 3600) / 60)
}

/// Parse a per-day shift window argument:
/// `HH:MM-HH:MM` or `HH:MM-HH:MM@HH:MM-HH:MM` (meal window after `@`).
pub fn parse_window(input: &str) -> AppResult<DayWindow> {
    let (shift, meal) = match input.split_once('@') {
        Some((s, m)) => (s, Some(m)),
        None => (input, None),
    };

    let (entrance, exit) = parse_span(shift)?;
    let (meal_start, meal_end) = match meal {
        Some(m) => {
            let (s, e) = parse_span(m)?;
            (Some(s), Some(e))
        }
        None => (None, None),
    };

    Ok(DayWindow {
        entrance,
        exit,
        meal_start,
        meal_end,
    })
}

fn parse_span(span: &str) -> AppResult<(NaiveTime, NaiveTime)> {
    let (a, b) = span
        .split_once('-')
        .ok_or_else(|| AppError::InvalidWindow(span.to_string()))?;
    let start = parse_time(a.trim()).ok_or_else(|| AppError::InvalidTime(a.to_string()))?;
    let end = parse_time(b.trim()).ok_or_else(|| AppError::InvalidTime(b.to_string()))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_time_shapes() {
        assert!(parse_time("08:30").is_some());
        assert!(parse_time("08:30:15").is_some());
        assert!(parse_time("8h30").is_none());
    }

    #[test]
    fn window_without_meal() {
        let w = parse_window("09:00-17:00").unwrap();
        assert_eq!(w.meal_start, None);
        assert_eq!(w.scheduled_seconds(), Some(8 * 3600));
    }

    #[test]
    fn window_with_meal() {
        let w = parse_window("09:00-18:00@13:00-14:00").unwrap();
        assert_eq!(w.scheduled_seconds(), Some(8 * 3600));
    }

    #[test]
    fn malformed_window_is_rejected() {
        assert!(parse_window("09:00").is_err());
        assert!(parse_window("09:00-banana").is_err());
    }

    #[test]
    fn formats_signed_seconds() {
        assert_eq!(format_seconds(30_600), "08:30");
        assert_eq!(format_seconds(-1800), "-00:30");
        assert_eq!(format_seconds(0), "00:00");
    }
}
