//! Shared snapshot surface read by the passive widget process.
//!
//! A small JSON blob overwritten wholesale on every publication, never
//! merged: latest write wins, no history, no transactional guarantee.
//! Writes go through a temp file + rename so the widget never observes a
//! partial blob. A missing container directory downgrades the write to a
//! warning and a skip.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedSnapshot {
    /// Today's completed work, in hours.
    pub today_hours: f64,
    /// Instant of the last publication, RFC 3339.
    pub last_updated: Option<String>,
    /// ISO-8601 date-only buckets with completed work this year, ascending.
    pub work_days: Vec<String>,
}

impl SharedSnapshot {
    pub fn has_work_today(&self) -> bool {
        self.today_hours > 0.0
    }

    pub fn work_day_dates(&self) -> Vec<NaiveDate> {
        self.work_days
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .collect()
    }
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Marker file touched after every write: the one-way "please re-render
    /// now" signal for the widget process.
    pub fn refresh_marker(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot.json".to_string());
        name.push_str(".refresh");
        self.path.with_file_name(name)
    }

    /// Read the snapshot; a missing or corrupt file yields the empty default
    /// so the widget renders zeros instead of failing.
    pub fn load(&self) -> SharedSnapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return SharedSnapshot::default(),
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Corrupt snapshot; using empty default");
            SharedSnapshot::default()
        })
    }

    /// Overwrite the snapshot atomically (temp file + rename).
    pub fn save(&self, snapshot: &SharedSnapshot) -> AppResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| AppError::Snapshot(format!("no container for {}", self.path.display())))?;

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AppError::Snapshot(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| AppError::Snapshot(format!("{}: {}", dir.display(), e)))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| AppError::Snapshot(e.to_string()))?;
        Ok(())
    }

    /// Touch the refresh marker. Fire-and-forget: failures are warned and
    /// swallowed.
    pub fn signal_refresh(&self) {
        let marker = self.refresh_marker();
        if let Err(e) = fs::write(&marker, Local::now().to_rfc3339()) {
            warn!(path = %marker.display(), error = %e, "Refresh signal skipped");
        }
    }

    /// Remove all shared data (explicit data reset).
    pub fn reset(&self) -> AppResult<()> {
        for path in [self.path.clone(), self.refresh_marker()] {
            match fs::remove_file(&path) {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_snapshot_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshot.json"));

        let snap = SharedSnapshot {
            today_hours: 1.5,
            last_updated: Some("2026-03-14T10:00:00+00:00".to_string()),
            work_days: vec!["2026-03-13".to_string(), "2026-03-14".to_string()],
        };
        store.save(&snap).unwrap();
        store.signal_refresh();

        let loaded = store.load();
        assert_eq!(loaded.today_hours, 1.5);
        assert_eq!(loaded.work_day_dates().len(), 2);
        assert!(store.refresh_marker().exists());

        store.reset().unwrap();
        assert!(!store.path().exists());
        assert!(!store.refresh_marker().exists());
        assert_eq!(store.load().today_hours, 0.0);
    }

    #[test]
    fn corrupt_snapshot_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{not json").unwrap();

        let store = SnapshotStore::new(path);
        let snap = store.load();
        assert_eq!(snap.today_hours, 0.0);
        assert!(snap.work_days.is_empty());
    }

    #[test]
    fn save_into_missing_container_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("gone").join("snapshot.json"));
        assert!(store.save(&SharedSnapshot::default()).is_err());
    }

    #[test]
    fn original_key_names_are_preserved() {
        let snap = SharedSnapshot {
            today_hours: 2.0,
            last_updated: None,
            work_days: vec![],
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("todayHours"));
        assert!(json.contains("workDays"));
    }
}
