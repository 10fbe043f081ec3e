//! Calendar rendering over a work-day set.

use crate::utils::colors::{BOLD, GREEN, GREY, RESET};
use crate::utils::date::all_days_of_month;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Classic month grid (Monday first); work days green, today bold.
pub fn month_grid(
    year: i32,
    month: u32,
    work_days: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let title = format!("{} {}", MONTH_NAMES[(month - 1) as usize], year);
    out.push_str(&format!("{BOLD}{:^20}{RESET}\n", title));
    out.push_str(&format!("{GREY}Mo Tu We Th Fr Sa Su{RESET}\n"));

    let days = all_days_of_month(year, month);
    let mut line = String::new();
    if let Some(first) = days.first() {
        for _ in 0..first.weekday().num_days_from_monday() {
            line.push_str("   ");
        }
    }

    for d in days {
        let cell = format!("{:>2}", d.day());
        if work_days.contains(&d) {
            line.push_str(&format!("{GREEN}{cell}{RESET} "));
        } else if d == today {
            line.push_str(&format!("{BOLD}{cell}{RESET} "));
        } else {
            line.push_str(&format!("{cell} "));
        }
        if d.weekday() == Weekday::Sun {
            line.push('\n');
            out.push_str(&line);
            line.clear();
        }
    }
    if !line.is_empty() {
        line.push('\n');
        out.push_str(&line);
    }
    out
}

/// Year-at-a-glance: one row per month, one cell per day, work days filled.
pub fn year_overview(year: i32, work_days: &BTreeSet<NaiveDate>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{BOLD}{year}{RESET}\n"));

    for month in 1..=12u32 {
        let mut line = format!("{} ", MONTH_ABBREV[(month - 1) as usize]);
        for d in all_days_of_month(year, month) {
            if work_days.contains(&d) {
                line.push_str(&format!("{GREEN}●{RESET}"));
            } else {
                line.push_str(&format!("{GREY}·{RESET}"));
            }
        }
        line.push('\n');
        out.push_str(&line);
    }
    out
}
