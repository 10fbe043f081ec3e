use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::write_log;
use crate::errors::AppResult;
use crate::utils::time::parse_duration;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database with the session schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing uptimer…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let conn = Connection::open(&cfg.database)?;
    let seed = parse_duration(&cfg.target_duration).unwrap_or(3600);
    init_db(&conn, seed)?;

    println!("✅ Database initialized at {}", &cfg.database);

    // Internal log (non-blocking)
    if let Err(e) = write_log(
        &conn,
        "init",
        "",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 uptimer initialization completed!");
    Ok(())
}
