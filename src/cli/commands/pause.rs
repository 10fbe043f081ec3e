use crate::cli::commands::open_db;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::timer::SessionTimer;
use crate::db::state::{load_state, save_state};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::fmt_clock;

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

    let Some(frozen) = timer.pause() else {
        info("No running session to pause.");
        return Ok(());
    };

    // Phase change and alert cancellation land in the same row update.
    stored.phase = timer.phase();
    stored.alert_due = None;
    save_state(&pool.conn, &stored)?;

    success(format!("Session paused at {}", fmt_clock(frozen)));
    Ok(())
}
