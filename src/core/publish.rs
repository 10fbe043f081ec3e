//! Republication of derived aggregates to the shared snapshot surface.
//!
//! Called after every mutation of the record set (stop, test-session add,
//! delete, reset). Failures never propagate: the widget simply keeps showing
//! the pre-failure snapshot.

use crate::core::aggregate;
use crate::snapshot::{SharedSnapshot, SnapshotStore};
use crate::utils::date;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use tracing::warn;

/// Recompute today's total and the work-day set for the year containing
/// `day`, overwrite the snapshot and raise the refresh signal.
pub fn republish(conn: &Connection, store: &SnapshotStore, day: NaiveDate) {
    let today = date::today();
    let today_secs = aggregate::total_duration_secs(conn, today);
    let work_days = aggregate::work_days(conn, day);

    let snapshot = SharedSnapshot {
        today_hours: today_secs as f64 / 3600.0,
        last_updated: Some(Local::now().to_rfc3339()),
        work_days: work_days
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect(),
    };

    if let Err(e) = store.save(&snapshot) {
        warn!(path = %store.path().display(), error = %e, "Snapshot write skipped");
        return;
    }
    store.signal_refresh();
}

/// Explicit data reset: clear the shared surface and tell the widget.
pub fn reset(store: &SnapshotStore) {
    if let Err(e) = store.reset() {
        warn!(path = %store.path().display(), error = %e, "Snapshot reset skipped");
        return;
    }
    store.signal_refresh();
}
