use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate;
use crate::errors::AppResult;
use crate::ui::calendar::year_overview;
use crate::utils::date;
use chrono::Datelike;

/// Render the main-window year calendar from the session store.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { year } = cmd {
        let year = year.unwrap_or_else(|| date::today().year());
        let pool = open_db(cfg)?;
        let days = aggregate::work_days_of_year(&pool.conn, year);

        println!("{}", year_overview(year, &days));
        println!("Work days in {}: {}", year, days.len());
    }
    Ok(())
}
