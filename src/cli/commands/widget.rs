use crate::cli::commands::snapshot_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::snapshot::SnapshotStore;
use crate::ui::calendar::month_grid;
use crate::utils::colors::{BOLD, CYAN, GREY, RESET};
use crate::utils::date;
use chrono::Datelike;
use std::collections::BTreeSet;
use std::time::SystemTime;

/// Seconds between unconditional re-renders in follow mode.
const FULL_REFRESH_SECS: u64 = 3600;

/// The glanceable surface. Reads only the shared snapshot, never the
/// database: this command is the separate widget process of the system.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Widget { follow, ticks } = cmd {
        let store = snapshot_store(cfg);
        render(&store);

        if !*follow && ticks.is_none() {
            return Ok(());
        }

        let mut last_signal = marker_stamp(&store);
        let mut since_render: u64 = 0;
        let mut polled: u64 = 0;

        loop {
            polled += 1;
            if let Some(n) = *ticks
                && polled >= n
            {
                return Ok(());
            }
            std::thread::sleep(std::time::Duration::from_secs(1));
            since_render += 1;

            // Re-render hourly, or as soon as the refresh signal fires.
            let signal = marker_stamp(&store);
            if signal != last_signal || since_render >= FULL_REFRESH_SECS {
                last_signal = signal;
                since_render = 0;
                render(&store);
            }
        }
    }
    Ok(())
}

fn marker_stamp(store: &SnapshotStore) -> Option<SystemTime> {
    std::fs::metadata(store.refresh_marker())
        .and_then(|m| m.modified())
        .ok()
}

fn render(store: &SnapshotStore) {
    let snap = store.load();
    let today = date::today();
    let work: BTreeSet<_> = snap.work_day_dates().into_iter().collect();

    let check = if snap.has_work_today() { " ✔" } else { "" };
    println!(
        "{BOLD}{CYAN}Uptime{RESET} - today {:.1}h{}",
        snap.today_hours, check
    );
    println!();
    print!("{}", month_grid(today.year(), today.month(), &work, today));
    match &snap.last_updated {
        Some(ts) => println!("{GREY}updated {ts}{RESET}"),
        None => println!("{GREY}no data published yet{RESET}"),
    }
}
