//! Day-bucketed aggregation over the session store.
//!
//! Aggregates are always recomputed from the authoritative records, never
//! stored. The query policy is degrade-not-raise: an unavailable store yields
//! an empty result set and downstream values report zero/empty.

use crate::db::queries;
use crate::utils::date::year_bounds;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::collections::BTreeSet;
use tracing::warn;

/// Total completed duration (seconds) on a day bucket; 0 when the day has no
/// sessions or the store is unavailable.
pub fn total_duration_secs(conn: &Connection, day: NaiveDate) -> i64 {
    let sessions = queries::sessions_on_day(conn, day).unwrap_or_else(|e| {
        warn!(day = %day, error = %e, "Session fetch failed; treating day as empty");
        Vec::new()
    });
    sessions.iter().map(|s| s.duration_secs).sum()
}

/// Day buckets with at least one closed session contributing nonzero
/// duration in the year containing `day`.
pub fn work_days(conn: &Connection, day: NaiveDate) -> BTreeSet<NaiveDate> {
    work_days_of_year(conn, day.year())
}

pub fn work_days_of_year(conn: &Connection, year: i32) -> BTreeSet<NaiveDate> {
    let (from, to) = year_bounds(year);
    let sessions = queries::sessions_in_range(conn, from, to).unwrap_or_else(|e| {
        warn!(year, error = %e, "Session fetch failed; treating year as empty");
        Vec::new()
    });
    sessions
        .iter()
        .filter(|s| !s.is_open() && s.duration_secs > 0)
        .map(|s| s.date)
        .collect()
}

/// True when the day bucket has any completed work.
pub fn has_work(conn: &Connection, day: NaiveDate) -> bool {
    total_duration_secs(conn, day) > 0
}
