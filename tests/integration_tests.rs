use predicates::str::contains;

mod common;
use common::{init_with_timer, setup_test_db, setup_test_snapshot, upt};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");
    let snap_path = setup_test_snapshot("init");

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_start_without_configured_timer_is_a_noop() {
    let db_path = setup_test_db("start_unconfigured");
    let snap_path = setup_test_snapshot("start_unconfigured");

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "init"])
        .assert()
        .success();

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success()
        .stdout(contains("Timer is not set"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("Idle"));
}

#[test]
fn test_full_session_lifecycle() {
    let db_path = setup_test_db("lifecycle");
    let snap_path = setup_test_snapshot("lifecycle");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success()
        .stdout(contains("Session started (target 01:00:00)"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("Running"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "pause"])
        .assert()
        .success()
        .stdout(contains("Session paused"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("Paused"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "resume"])
        .assert()
        .success()
        .stdout(contains("Session resumed"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "stop"])
        .assert()
        .success()
        .stdout(contains("Session recorded"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("Idle"));
}

#[test]
fn test_stop_twice_is_a_noop() {
    let db_path = setup_test_db("double_stop");
    let snap_path = setup_test_snapshot("double_stop");
    init_with_timer(&db_path, &snap_path, "30m");

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success();

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "stop"])
        .assert()
        .success()
        .stdout(contains("Session recorded"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "stop"])
        .assert()
        .success()
        .stdout(contains("No session to stop"));
}

#[test]
fn test_redundant_transitions_are_noops() {
    let db_path = setup_test_db("redundant");
    let snap_path = setup_test_snapshot("redundant");
    init_with_timer(&db_path, &snap_path, "30m");

    // Pause/resume with no session at all
    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "pause"])
        .assert()
        .success()
        .stdout(contains("No running session"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "resume"])
        .assert()
        .success()
        .stdout(contains("No paused session"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success();

    // Start while running, resume while running
    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success()
        .stdout(contains("already running"));

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "resume"])
        .assert()
        .success()
        .stdout(contains("No paused session"));
}

#[test]
fn test_timer_is_locked_while_a_session_is_open() {
    let db_path = setup_test_db("timer_locked");
    let snap_path = setup_test_snapshot("timer_locked");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "start"])
        .assert()
        .success();

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "timer",
            "--target",
            "30m",
        ])
        .assert()
        .success()
        .stdout(contains("can only be changed while idle"));

    // Target unchanged
    upt()
        .args(["--db", &db_path, "--snapshot", &snap_path, "--test", "timer"])
        .assert()
        .success()
        .stdout(contains("01:00:00"));
}

#[test]
fn test_add_sessions_and_day_total() {
    let db_path = setup_test_db("add_total");
    let snap_path = setup_test_snapshot("add_total");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "2026-03-14",
            "30m",
        ])
        .assert()
        .success()
        .stdout(contains("Added"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "2026-03-14",
            "1h",
        ])
        .assert()
        .success();

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "list",
            "--period",
            "2026-03-14",
        ])
        .assert()
        .success()
        .stdout(contains("2026-03-14"))
        .stdout(contains("01h 30m"));
}

#[test]
fn test_list_period_filters() {
    let db_path = setup_test_db("list_periods");
    let snap_path = setup_test_snapshot("list_periods");
    init_with_timer(&db_path, &snap_path, "1h");

    for (date, duration) in [
        ("2025-08-31", "1h"),
        ("2025-09-15", "1h"),
        ("2024-09-10", "1h"),
    ] {
        upt()
            .args([
                "--db",
                &db_path,
                "--snapshot",
                &snap_path,
                "--test",
                "add",
                date,
                duration,
            ])
            .assert()
            .success();
    }

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "list",
            "--period",
            "2024-09:2025-09",
        ])
        .assert()
        .success()
        .stdout(contains("2025-08-31"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("2024-09-10"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "list",
            "--period",
            "2024",
        ])
        .assert()
        .success()
        .stdout(contains("2024-09-10"))
        .stdout(contains("1 sessions"));
}

#[test]
fn test_del_by_date_and_del_all() {
    let db_path = setup_test_db("del");
    let snap_path = setup_test_snapshot("del");
    init_with_timer(&db_path, &snap_path, "1h");

    for date in ["2026-01-05", "2026-01-06"] {
        upt()
            .args([
                "--db",
                &db_path,
                "--snapshot",
                &snap_path,
                "--test",
                "add",
                date,
                "1h",
            ])
            .assert()
            .success();
    }

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "del",
            "2026-01-05",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("Deleted 1 sessions for 2026-01-05"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "del",
            "--all",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("reset the snapshot"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "list",
            "--period",
            "2026",
        ])
        .assert()
        .success()
        .stdout(contains("No sessions"));
}

#[test]
fn test_calendar_counts_work_days() {
    let db_path = setup_test_db("calendar");
    let snap_path = setup_test_snapshot("calendar");
    init_with_timer(&db_path, &snap_path, "1h");

    for date in ["2026-01-05", "2026-07-09"] {
        upt()
            .args([
                "--db",
                &db_path,
                "--snapshot",
                &snap_path,
                "--test",
                "add",
                date,
                "30m",
            ])
            .assert()
            .success();
    }

    // A session in another year must not count
    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "2025-12-31",
            "30m",
        ])
        .assert()
        .success();

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "calendar",
            "--year",
            "2026",
        ])
        .assert()
        .success()
        .stdout(contains("2026"))
        .stdout(contains("Work days in 2026: 2"));
}

#[test]
fn test_watch_renders_idle_state() {
    let db_path = setup_test_db("watch_idle");
    let snap_path = setup_test_snapshot("watch_idle");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "watch",
            "--ticks",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("idle"));
}

#[test]
fn test_db_maintenance_commands() {
    let db_path = setup_test_db("db_maint");
    let snap_path = setup_test_snapshot("db_maint");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args([
            "--db", &db_path, "--snapshot", &snap_path, "--test", "db", "--info", "--check",
            "--vacuum",
        ])
        .assert()
        .success()
        .stdout(contains("Total sessions"))
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    let snap_path = setup_test_snapshot("log_ops");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "2026-02-02",
            "1h",
        ])
        .assert()
        .success();

    upt()
        .args([
            "--db", &db_path, "--snapshot", &snap_path, "--test", "log", "--print",
        ])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"));
}

#[test]
fn test_invalid_inputs_error_out() {
    let db_path = setup_test_db("invalid_inputs");
    let snap_path = setup_test_snapshot("invalid_inputs");
    init_with_timer(&db_path, &snap_path, "1h");

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "not-a-date",
            "1h",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "add",
            "2026-02-02",
            "zzz",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    upt()
        .args([
            "--db",
            &db_path,
            "--snapshot",
            &snap_path,
            "--test",
            "list",
            "--period",
            "garbage",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}
