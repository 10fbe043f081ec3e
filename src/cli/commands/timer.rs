use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::Phase;
use crate::db::log::write_log;
use crate::db::state::{load_state, save_state};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::time::{fmt_hms, parse_duration};

/// Show or change the countdown target.
///
/// The timer configuration is mutable only while no session is open; a
/// change attempted mid-session is a warned no-op.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer { target, clear } = cmd {
        let pool = open_db(cfg)?;
        let mut state = load_state(&pool.conn)?;

        if let Some(expr) = target {
            let secs = parse_duration(expr)?;
            if secs < 1 {
                return Err(AppError::InvalidDuration(expr.clone()));
            }
            if !matches!(state.phase, Phase::Idle) {
                warning("A session is open; the timer can only be changed while idle.");
                return Ok(());
            }

            state.target_secs = secs;
            state.enabled = true;
            save_state(&pool.conn, &state)?;
            if let Err(e) = write_log(&pool.conn, "timer", expr, "Target changed") {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }
            success(format!("Timer set: target {} (enabled)", fmt_hms(secs)));
            return Ok(());
        }

        if *clear {
            if !matches!(state.phase, Phase::Idle) {
                warning("A session is open; the timer can only be changed while idle.");
                return Ok(());
            }
            state.enabled = false;
            save_state(&pool.conn, &state)?;
            success("Timer disabled.");
            return Ok(());
        }

        // Default: show the current timer configuration.
        println!("Target:  {}", fmt_hms(state.target_secs));
        println!(
            "Enabled: {}",
            if state.enabled { "yes" } else { "no" }
        );
        println!("State:   {}", state.phase.name());
    }

    Ok(())
}
