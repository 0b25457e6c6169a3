#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(session: &Path) -> Command {
    let mut cmd = Command::cargo_bin("duty-roster-cli").unwrap();
    cmd.arg("--session").arg(session);
    cmd
}

#[test]
fn generate_prints_table_and_summary() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");

    cli(&session).args(["roles", "ER;ICU1"]).assert().success();
    cli(&session).args(["calendar", "--days", "4"]).assert().success();
    cli(&session).args(["holidays", "2"]).assert().success();
    for name in ["alice", "bob", "carol"] {
        cli(&session)
            .args(["add-person", "--name", name, "--max-shifts", "5"])
            .assert()
            .success();
    }

    let csv_path = dir.path().join("out.csv");
    cli(&session)
        .args(["generate", "--seed", "7", "--out-csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Day | ER"))
        .stdout(predicate::str::contains("2*"))
        .stdout(predicate::str::contains("Name"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Day,ER,ICU1,Holiday\n"));
    assert_eq!(csv.lines().count(), 5);

    cli(&session)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("generated at"));
}

#[test]
fn empty_roster_reports_unfilled_slots() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");

    cli(&session)
        .args(["generate", "--days", "2", "--seed", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("10 slot(s) could not be filled"));
}

#[test]
fn check_flags_non_positive_cap() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");

    cli(&session)
        .args(["add-person", "--name", "zed", "--max-shifts", "-1"])
        .assert()
        .success();
    cli(&session)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("zed: max_shifts -1 <= 0"));
}

#[test]
fn show_without_schedule_fails() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    cli(&session)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no schedule generated yet"));
}

#[test]
fn duplicate_roles_are_rejected() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    cli(&session)
        .args(["roles", "ER;ER"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate role: ER"));
}

#[test]
fn month_calendar_marks_weekends() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    cli(&session)
        .args(["calendar", "--month", "2025-02", "--weekends-as-holidays"])
        .assert()
        .success()
        .stdout(predicate::str::contains("period: 28 day(s)"));

    let saved = std::fs::read_to_string(&session).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["calendar"]["num_days"], 28);
    assert_eq!(json["calendar"]["holidays"].as_array().unwrap().len(), 8);
}

#[test]
fn session_with_overlong_period_is_refused() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    std::fs::write(&session, r#"{"calendar":{"num_days":45}}"#).unwrap();

    cli(&session)
        .args(["generate", "--seed", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("45").not())
        .stderr(predicate::str::contains("day count out of range: 45"));
}

#[test]
fn generate_days_is_saved_in_the_session() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    cli(&session)
        .args(["generate", "--days", "3", "--seed", "1"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&session).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["calendar"]["num_days"], 3);
}

#[test]
fn show_keeps_holidays_from_generation_time() {
    let dir = tempdir().unwrap();
    let session = dir.path().join("session.json");
    cli(&session).args(["roles", "R1"]).assert().success();
    cli(&session).args(["calendar", "--days", "3"]).assert().success();
    cli(&session).args(["holidays", "2"]).assert().success();
    cli(&session)
        .args(["add-person", "--name", "alice", "--max-shifts", "5"])
        .assert()
        .success();
    cli(&session).args(["generate", "--seed", "3"]).assert().success();

    cli(&session).arg("holidays").assert().success();
    cli(&session)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("2*"))
        .stdout(predicate::str::contains("alice | 3     | 2       | 1"));
}
