use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database schema.
///
/// Ensures the `sessions`, `timer_state` and `log` tables exist and that the
/// single `timer_state` row is present. `target_secs` is seeded by the caller
/// (from the config file) only when the row is first created.
pub fn init_db(conn: &Connection, seed_target_secs: i64) -> AppResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,              -- YYYY-MM-DD, day bucket of start
            start_time  TEXT NOT NULL,              -- RFC 3339
            end_time    TEXT,                       -- NULL while open
            duration    INTEGER NOT NULL DEFAULT 0, -- seconds, end - start once closed
            created_at  TEXT NOT NULL               -- RFC 3339
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);

        CREATE TABLE IF NOT EXISTS timer_state (
            id            INTEGER PRIMARY KEY CHECK (id = 1),
            phase         TEXT NOT NULL CHECK (phase IN ('idle','running','paused')),
            session_id    INTEGER,
            virtual_start TEXT,                         -- RFC 3339, running only
            frozen_secs   INTEGER NOT NULL DEFAULT 0,   -- paused only
            enabled       INTEGER NOT NULL DEFAULT 0,
            target_secs   INTEGER NOT NULL DEFAULT 3600,
            alert_due     TEXT,                         -- RFC 3339, pending completion alert
            alert_fired   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            operation TEXT NOT NULL,
            target TEXT DEFAULT '',
            message TEXT NOT NULL
        );
        ",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO timer_state (id, phase, target_secs) VALUES (1, 'idle', ?1)",
        [seed_target_secs],
    )?;

    Ok(())
}
