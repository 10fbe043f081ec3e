use crate::cli::commands::{open_db, snapshot_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::publish;
use crate::core::timer::Phase;
use crate::db::log::write_log;
use crate::db::queries::{delete_all_sessions, delete_sessions_on_day, session_by_id};
use crate::db::state::{load_state, save_state};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date;
use rusqlite::Connection;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// If the open session was deleted out from under the machine, drop back to
/// idle; the phase and the pending alert are cleared together.
fn clear_stale_state(conn: &Connection) -> AppResult<()> {
    let mut stored = load_state(conn)?;
    let stale = match stored.session_id {
        Some(id) => session_by_id(conn, id)?.is_none(),
        None => false,
    };
    if stale {
        stored.phase = Phase::Idle;
        stored.session_id = None;
        stored.alert_due = None;
        stored.alert_fired = false;
        save_state(conn, &stored)?;
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date: date_str,
        all,
        yes,
    } = cmd
    {
        //
        // Confirmation prompt
        //
        let prompt = if *all {
            "Delete ALL sessions? This action is irreversible.".to_string()
        } else {
            let d = date_str.as_deref().unwrap_or_default();
            format!("Delete all sessions for {}? This action is irreversible.", d)
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let pool = open_db(cfg)?;
        let store = snapshot_store(cfg);

        if *all {
            let n = delete_all_sessions(&pool.conn)?;
            clear_stale_state(&pool.conn)?;
            publish::reset(&store);

            if let Err(e) = write_log(&pool.conn, "reset", "", "All sessions deleted") {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }
            success(format!("Deleted {} sessions and reset the snapshot.", n));
            return Ok(());
        }

        let raw = date_str
            .as_deref()
            .ok_or_else(|| AppError::InvalidDate(String::new()))?;
        let d = date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))?;

        let n = delete_sessions_on_day(&pool.conn, d)?;
        clear_stale_state(&pool.conn)?;
        publish::republish(&pool.conn, &store, d);

        if let Err(e) = write_log(
            &pool.conn,
            "del",
            &d.to_string(),
            &format!("{} sessions deleted", n),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }
        success(format!("Deleted {} sessions for {}.", n, d));
    }

    Ok(())
}
