use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::sessions_in_range;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::utils::colors::{BOLD, CYAN, GREY, RESET};
use crate::utils::date::{self, last_day_of_month, resolve_period};
use crate::utils::time::fmt_hours_minutes;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, now } = cmd {
        let pool = open_db(cfg)?;

        let (from, to) = if *now {
            let t = date::today();
            (t, t)
        } else if let Some(p) = period {
            resolve_period(p)?
        } else {
            // Default: the current month.
            let t = date::today();
            let first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1)
                .unwrap_or(t);
            (first, last_day_of_month(t.year(), t.month()))
        };

        let sessions = sessions_in_range(&pool.conn, from, to)?;
        if sessions.is_empty() {
            println!("No sessions between {} and {}.", from, to);
            return Ok(());
        }

        let mut by_day: BTreeMap<NaiveDate, Vec<Session>> = BTreeMap::new();
        for s in sessions {
            by_day.entry(s.date).or_default().push(s);
        }

        let mut grand_total: i64 = 0;
        let mut count = 0usize;

        for (day, sessions) in &by_day {
            println!("\n{BOLD}=== {} ==={RESET}", day);
            let mut day_total = 0i64;
            for s in sessions {
                count += 1;
                match s.end {
                    Some(end) => {
                        println!(
                            "  {} - {}  {}",
                            s.start.format("%H:%M"),
                            end.format("%H:%M"),
                            fmt_hours_minutes(s.duration_secs)
                        );
                        day_total += s.duration_secs;
                    }
                    None => {
                        println!("  {} {GREY}(open){RESET}", s.start.format("%H:%M"));
                    }
                }
            }
            println!("  {CYAN}Total:{RESET} {}", fmt_hours_minutes(day_total));
            grand_total += day_total;
        }

        println!(
            "\n{CYAN}Range total:{RESET} {} ({} sessions, {} work days)",
            fmt_hours_minutes(grand_total),
            count,
            by_day.len()
        );
    }
    Ok(())
}
