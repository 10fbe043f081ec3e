use crate::cli::commands::{open_db, watch};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::timer::{Phase, SessionTimer};
use crate::db::log::write_log;
use crate::db::queries::insert_open_session;
use crate::db::state::{load_state, save_state};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::fmt_hms;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { watch: follow } = cmd {
        let pool = open_db(cfg)?;
        let mut stored = load_state(&pool.conn)?;

        match stored.phase {
            Phase::Running { .. } => {
                info("A session is already running.");
                return Ok(());
            }
            Phase::Paused { .. } => {
                info("A session is paused; resume or stop it first.");
                return Ok(());
            }
            Phase::Idle => {}
        }

        let mut timer = SessionTimer::new(SystemClock, stored.enabled, stored.target_secs);
        let Some(at) = timer.start() else {
            warning("Timer is not set. Configure a target first: uptimer timer --target 25m");
            return Ok(());
        };

        let session_id = insert_open_session(&pool.conn, at)?;

        stored.phase = timer.phase();
        stored.session_id = Some(session_id);
        stored.alert_due = Some(at + chrono::Duration::seconds(stored.target_secs));
        stored.alert_fired = false;
        save_state(&pool.conn, &stored)?;

        if let Err(e) = write_log(
            &pool.conn,
            "start",
            &at.date_naive().to_string(),
            "Session started",
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        success(format!(
            "Session started (target {})",
            fmt_hms(stored.target_secs)
        ));

        if *follow {
            drop(pool);
            return watch::follow(cfg, None);
        }
    }

    Ok(())
}
