//! Persisted timer state.
//!
//! The state machine lives in memory for at most one command invocation;
//! between invocations its phase, the open session id and the pending
//! completion alert are carried by the single-row `timer_state` table.
//! Phase changes and alert changes are written together, so cancelling the
//! alert on pause/stop is exactly-once, never best-effort.

use crate::core::timer::Phase;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct StoredTimer {
    pub phase: Phase,
    pub session_id: Option<i64>,
    pub enabled: bool,
    pub target_secs: i64,
    pub alert_due: Option<DateTime<Local>>,
    pub alert_fired: bool,
}

fn parse_instant(s: &str) -> AppResult<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn load_state(conn: &Connection) -> AppResult<StoredTimer> {
    let row = conn.query_row(
        "SELECT phase, session_id, virtual_start, frozen_secs,
                enabled, target_secs, alert_due, alert_fired
         FROM timer_state WHERE id = 1",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)? != 0,
                row.get::<_, i64>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, i64>(7)? != 0,
            ))
        },
    )?;

    let (phase_str, session_id, virtual_start, frozen_secs, enabled, target_secs, due, fired) = row;

    let phase = match phase_str.as_str() {
        "running" => {
            let raw = virtual_start
                .ok_or_else(|| AppError::Other("running state without start instant".into()))?;
            Phase::Running {
                virtual_start: parse_instant(&raw)?,
            }
        }
        "paused" => Phase::Paused { frozen_secs },
        _ => Phase::Idle,
    };

    let alert_due = match due {
        Some(raw) => Some(parse_instant(&raw)?),
        None => None,
    };

    Ok(StoredTimer {
        phase,
        session_id,
        enabled,
        target_secs,
        alert_due,
        alert_fired: fired,
    })
}

pub fn save_state(conn: &Connection, state: &StoredTimer) -> AppResult<()> {
    let (phase_str, virtual_start, frozen_secs) = match state.phase {
        Phase::Idle => ("idle", None, 0),
        Phase::Running { virtual_start } => ("running", Some(virtual_start.to_rfc3339()), 0),
        Phase::Paused { frozen_secs } => ("paused", None, frozen_secs),
    };

    conn.execute(
        "UPDATE timer_state
         SET phase = ?1, session_id = ?2, virtual_start = ?3, frozen_secs = ?4,
             enabled = ?5, target_secs = ?6, alert_due = ?7, alert_fired = ?8
         WHERE id = 1",
        params![
            phase_str,
            state.session_id,
            virtual_start,
            frozen_secs,
            state.enabled as i64,
            state.target_secs,
            state.alert_due.map(|dt| dt.to_rfc3339()),
            state.alert_fired as i64,
        ],
    )?;
    Ok(())
}

/// Latch the one-shot completion flag without touching the rest of the row.
pub fn mark_alert_fired(conn: &Connection) -> AppResult<()> {
    conn.execute("UPDATE timer_state SET alert_fired = 1 WHERE id = 1", [])?;
    Ok(())
}
