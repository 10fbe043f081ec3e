#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn upt() -> Command {
    cargo_bin_cmd!("uptimer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_uptimer.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique snapshot path inside the system temp dir, clearing both
/// the blob and its refresh marker
pub fn setup_test_snapshot(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_uptimer_snapshot.json", name));
    let snap_path = path.to_string_lossy().to_string();
    fs::remove_file(&snap_path).ok();
    fs::remove_file(format!("{}.refresh", &snap_path)).ok();
    snap_path
}

/// Initialize the database and set an enabled countdown target
pub fn init_with_timer(db_path: &str, snap_path: &str, target: &str) {
    upt()
        .args(["--db", db_path, "--snapshot", snap_path, "--test", "init"])
        .assert()
        .success();

    upt()
        .args([
            "--db",
            db_path,
            "--snapshot",
            snap_path,
            "--test",
            "timer",
            "--target",
            target,
        ])
        .assert()
        .success();
}
