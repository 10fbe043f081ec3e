use crate::cli::commands::{open_db, snapshot_store};
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::publish;
use crate::core::timer::SessionTimer;
use crate::db::log::write_log;
use crate::db::queries::close_session;
use crate::db::state::{load_state, save_state};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::{date, time};

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

    let Some((at, elapsed)) = timer.stop() else {
        info("No session to stop.");
        return Ok(());
    };

    if let Some(id) = stored.session_id {
        close_session(&pool.conn, id, at)?;
    }

    stored.phase = timer.phase();
    stored.session_id = None;
    stored.alert_due = None;
    stored.alert_fired = false;
    save_state(&pool.conn, &stored)?;

    let today = date::today();
    publish::republish(&pool.conn, &snapshot_store(cfg), today);

    if let Err(e) = write_log(&pool.conn, "stop", &today.to_string(), "Session recorded") {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    let today_total = crate::core::aggregate::total_duration_secs(&pool.conn, today);
    success(format!(
        "Session recorded ({} worked) - today {}",
        time::fmt_clock(elapsed),
        time::fmt_hours_minutes(today_total)
    ));
    Ok(())
}
