use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// Color per logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" | "add" => Colour::Green,
        "stop" => Colour::Blue,
        "del" | "reset" => Colour::Red,
        "timer" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = open_db(cfg)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op.len() + if target.is_empty() { 0 } else { target.len() + 3 })
            .max()
            .unwrap_or(10)
            .min(60);

        for (id, date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(date);

            let colored = if target.is_empty() {
                color_for_operation(&operation)
                    .paint(operation.as_str())
                    .to_string()
            } else {
                format!(
                    "{} ({})",
                    color_for_operation(&operation).paint(operation.as_str()),
                    target
                )
            };

            // Padding computed on visible width (without ANSI escapes)
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }
    }
    Ok(())
}
