pub mod add;
pub mod calendar;
pub mod config;
pub mod db;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod pause;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;
pub mod timer;
pub mod watch;
pub mod widget;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::snapshot::SnapshotStore;
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_duration;

/// Open the configured database with the schema guaranteed.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    let seed = parse_duration(&cfg.target_duration).unwrap_or(3600);
    init_db(&pool.conn, seed)?;
    Ok(pool)
}

pub(crate) fn snapshot_store(cfg: &Config) -> SnapshotStore {
    SnapshotStore::new(expand_tilde(&cfg.snapshot))
}
