use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Expand a period expression into an inclusive (from, to) date range.
/// Accepted shapes: `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, `YYYY-MM-DD:YYYY-MM-DD`.
pub fn resolve_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((a, b)) = p.split_once(':') {
        let (from, _) = resolve_period(a.trim())?;
        let (_, to) = resolve_period(b.trim())?;
        return Ok((from, to));
    }

    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if let Ok(year) = p.parse::<i32>() {
        let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| bad(p))?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| bad(p))?;
        return Ok((from, to));
    }

    Err(bad(p))
}

fn bad(p: &str) -> String {
    format!("Invalid period: {}", p)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).unwrap_or_else(|| today())
}
