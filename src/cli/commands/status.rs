use crate::cli::commands::open_db;
use crate::config::Config;
use crate::core::aggregate;
use crate::core::clock::SystemClock;
use crate::core::timer::{Phase, SessionTimer};
use crate::db::state::load_state;
use crate::errors::AppResult;
use crate::utils::colors::{BOLD, CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::{date, time};

/// One-shot view of the session state: the main-window numbers.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let stored = load_state(&pool.conn)?;

    let timer = SessionTimer::restore(
        SystemClock,
        stored.enabled,
        stored.target_secs,
        stored.phase,
        stored.alert_fired,
    );
    let report = timer.peek();

    let state_str = match stored.phase {
        Phase::Idle => format!("{GREY}Idle{RESET}"),
        Phase::Running { .. } => format!("{GREEN}{BOLD}Running{RESET}"),
        Phase::Paused { .. } => format!("{YELLOW}{BOLD}Paused{RESET}"),
    };

    println!("{}State:{}     {}", CYAN, RESET, state_str);
    if !matches!(stored.phase, Phase::Idle) {
        println!("{}Elapsed:{}   {}", CYAN, RESET, time::fmt_hms(report.elapsed_secs));
        println!("{}Remaining:{} {}", CYAN, RESET, time::fmt_hms(report.remaining_secs));
        println!(
            "{}Progress:{}  {:.0}%",
            CYAN,
            RESET,
            report.progress * 100.0
        );
    }
    println!(
        "{}Target:{}    {} ({})",
        CYAN,
        RESET,
        time::fmt_hms(stored.target_secs),
        if stored.enabled { "enabled" } else { "disabled" }
    );

    let today = date::today();
    println!(
        "{}Today:{}     {}",
        CYAN,
        RESET,
        time::fmt_hours_minutes(aggregate::total_duration_secs(&pool.conn, today))
    );

    Ok(())
}
