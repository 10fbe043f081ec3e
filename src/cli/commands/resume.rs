use crate::cli::commands::open_db;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::timer::SessionTimer;
use crate::db::state::{load_state, save_state};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::fmt_clock;
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let mut stored = load_state(&pool.conn)?;

    let mut timer = SessionTimer::restore(
        SystemClock,
        stored.enabled,
        stored.target_secs,
        stored.phase,
        stored.alert_fired,
    );

    if timer.resume().is_none() {
        info("No paused session to resume.");
        return Ok(());
    }

    // Reschedule the completion alert for the remaining duration.
    let remaining = timer.remaining_secs();
    stored.phase = timer.phase();
    stored.alert_due = if remaining > 0 && !stored.alert_fired {
        Some(Local::now() + chrono::Duration::seconds(remaining))
    } else {
        None
    };
    save_state(&pool.conn, &stored)?;

    success(format!(
        "Session resumed ({} elapsed)",
        fmt_clock(timer.elapsed_secs())
    ));
    Ok(())
}
