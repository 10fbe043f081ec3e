//! Date utilities: day buckets, period resolution, calendar helpers.
//!
//! A period string is either a year ("2026"), a month ("2026-03"), a day
//! ("2026-03-14"), or a range of two of the same kind joined by ':'
//! ("2026-01:2026-06"). Periods resolve to inclusive day-bucket bounds.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Inclusive [start, end] day-bucket bounds of a period expression.
pub fn resolve_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (s, _) = period_bounds(start_raw.trim())?;
        let (_, e) = period_bounds(end_raw.trim())?;
        if s > e {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }
        return Ok((s, e));
    }
    period_bounds(p)
}

fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if p.len() == 7
        && let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d")
    {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Ok(year_bounds(year));
    }

    Err(AppError::InvalidPeriod(p.to_string()))
}

/// First and last day bucket of a calendar year.
pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start"),
        NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end"),
    )
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.expect("valid next month").pred_opt().expect("valid month end")
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}
