//! Session record queries.
//!
//! Sessions are immutable once closed: the only mutations are closing the
//! single open record and the testing/reset deletions.

use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conv_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_instant(s: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conv_err(AppError::InvalidDate(s.to_string())))
}

pub fn map_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conv_err(AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let end_str: Option<String> = row.get("end_time")?;
    let created_str: String = row.get("created_at")?;

    let end = match end_str {
        Some(s) => Some(parse_instant(&s)?),
        None => None,
    };

    Ok(Session {
        id: row.get("id")?,
        date,
        start: parse_instant(&start_str)?,
        end,
        duration_secs: row.get("duration")?,
        created_at: parse_instant(&created_str)?,
    })
}

/// Open a new session record starting at `start`. Returns the new row id.
pub fn insert_open_session(conn: &Connection, start: DateTime<Local>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (date, start_time, end_time, duration, created_at)
         VALUES (?1, ?2, NULL, 0, ?3)",
        params![
            start.date_naive().format("%Y-%m-%d").to_string(),
            start.to_rfc3339(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close an open session: `end = now`, `duration = end - start` (wall clock
/// of the whole session, pauses included).
pub fn close_session(conn: &Connection, id: i64, end: DateTime<Local>) -> AppResult<()> {
    let session = match session_by_id(conn, id)? {
        Some(s) => s,
        None => return Ok(()), // already deleted; nothing to close
    };
    if !session.is_open() {
        return Ok(()); // already closed; never mutate a closed record
    }

    let duration = (end - session.start).num_seconds().max(0);
    conn.execute(
        "UPDATE sessions SET end_time = ?1, duration = ?2 WHERE id = ?3",
        params![end.to_rfc3339(), duration, id],
    )?;
    Ok(())
}

pub fn session_by_id(conn: &Connection, id: i64) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare("SELECT * FROM sessions WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All closed sessions on a day bucket, newest start first.
pub fn sessions_on_day(conn: &Connection, day: NaiveDate) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE date = ?1 AND end_time IS NOT NULL
         ORDER BY start_time DESC",
    )?;

    let rows = stmt.query_map([day.format("%Y-%m-%d").to_string()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All sessions with day bucket in `[from, to]`, ascending by day.
pub fn sessions_in_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC, start_time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string(),
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert an already-closed session for testing/backfill: starts at 09:00 on
/// `day` and lasts `duration_secs`.
pub fn insert_test_session(conn: &Connection, day: NaiveDate, duration_secs: i64) -> AppResult<i64> {
    let start = day
        .and_hms_opt(9, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?
        .and_local_timezone(Local)
        .single()
        .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
    let end = start + chrono::Duration::seconds(duration_secs);

    conn.execute(
        "INSERT INTO sessions (date, start_time, end_time, duration, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            day.format("%Y-%m-%d").to_string(),
            start.to_rfc3339(),
            end.to_rfc3339(),
            duration_secs,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete every session on a day bucket. Returns the number of rows removed.
pub fn delete_sessions_on_day(conn: &Connection, day: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM sessions WHERE date = ?1",
        [day.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

/// Delete every session. Returns the number of rows removed.
pub fn delete_all_sessions(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM sessions", [])?;
    Ok(n)
}
