use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate;
use crate::core::clock::SystemClock;
use crate::core::timer::{Phase, SessionTimer};
use crate::db::state::{load_state, mark_alert_fired};
use crate::errors::AppResult;
use crate::notify::{ALERT_BODY, ALERT_TITLE, Notifier, TerminalNotifier};
use crate::utils::time::{fmt_clock, fmt_hours_minutes};
use crate::utils::{colors, date};
use std::io::Write;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { ticks } = cmd {
        follow(cfg, *ticks)?;
    }
    Ok(())
}

/// Poll the persisted session state once per second and render a one-line
/// display, the menu-bar surface of the CLI. Delivers the completion alert
/// when a tick first crosses the target; the persisted fired flag keeps the
/// signal one-shot even across concurrent watchers.
pub fn follow(cfg: &Config, max_polls: Option<u64>) -> AppResult<()> {
    let pool = open_db(cfg)?;
    let notifier = TerminalNotifier;
    let mut polled: u64 = 0;

    loop {
        let stored = load_state(&pool.conn)?;
        let mut timer = SessionTimer::restore(
            SystemClock,
            stored.enabled,
            stored.target_secs,
            stored.phase,
            stored.alert_fired,
        );

        let line = match stored.phase {
            Phase::Running { .. } => {
                let report = match timer.tick() {
                    Some(r) => r,
                    None => timer.peek(),
                };
                if report.completed {
                    mark_alert_fired(&pool.conn)?;
                    println!();
                    notifier.deliver(ALERT_TITLE, ALERT_BODY);
                }
                format!(
                    "⏱  {}  {}remaining {}{}",
                    fmt_clock(report.elapsed_secs),
                    colors::GREY,
                    fmt_clock(report.remaining_secs),
                    colors::RESET
                )
            }
            Phase::Paused { frozen_secs } => {
                format!(
                    "⏸  {}paused at {}{}",
                    colors::YELLOW,
                    fmt_clock(frozen_secs),
                    colors::RESET
                )
            }
            Phase::Idle => {
                let today_total = aggregate::total_duration_secs(&pool.conn, date::today());
                format!(
                    "🕑 {}idle - today {}{}",
                    colors::GREY,
                    fmt_hours_minutes(today_total),
                    colors::RESET
                )
            }
        };

        print!("\r{}\x1b[K", line);
        std::io::stdout().flush()?;

        polled += 1;
        if let Some(n) = max_polls
            && polled >= n
        {
            println!();
            return Ok(());
        }
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
