use crate::cli::commands::{open_db, snapshot_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::publish;
use crate::db::log::write_log;
use crate::db::queries::insert_test_session;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::time::{fmt_hours_minutes, parse_duration};

/// Insert an already-closed session (testing/backfill utility).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        duration,
    } = cmd
    {
        //
        // 1. Parse date (mandatory)
        //
        let d = date::parse_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;

        //
        // 2. Parse duration (must be at least one second)
        //
        let secs = parse_duration(duration)?;
        if secs < 1 {
            return Err(AppError::InvalidDuration(duration.to_string()));
        }

        //
        // 3. Insert and republish the derived views
        //
        let pool = open_db(cfg)?;
        insert_test_session(&pool.conn, d, secs)?;
        publish::republish(&pool.conn, &snapshot_store(cfg), d);

        if let Err(e) = write_log(
            &pool.conn,
            "add",
            &d.to_string(),
            &format!("Test session of {}", fmt_hours_minutes(secs)),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        success(format!(
            "Added a {} session on {}",
            fmt_hours_minutes(secs),
            d
        ));
    }
    Ok(())
}
