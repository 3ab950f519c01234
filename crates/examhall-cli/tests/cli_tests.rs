//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examhall(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("examhall").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("EXAMHALL_STUDENTS")
        .env_remove("EXAMHALL_PARALLELISM");
    cmd
}

fn read_report(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn simulate_prints_statistics() {
    let dir = TempDir::new().unwrap();

    examhall(&dir)
        .args(["simulate", "--students", "10", "--parallelism", "4", "--think-time-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C++ Programming Basics"))
        .stdout(predicate::str::contains("Completed sessions"))
        .stdout(predicate::str::contains("2.00 / 4"));
}

#[test]
fn simulate_writes_json_report() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("out/report.json");

    examhall(&dir)
        .args(["simulate", "--students", "8", "--think-time-ms", "0", "--output"])
        .arg(&report_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let report = read_report(&report_path);
    assert_eq!(report["students"], 8);
    assert_eq!(report["completed_sessions"], 8);
    assert_eq!(report["active_sessions"], 0);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["strategy"], "alternating");
    assert_eq!(report["average_score"].as_f64().unwrap(), 2.0);
    assert_eq!(report["outcomes"].as_array().unwrap().len(), 8);
}

#[test]
fn simulate_uses_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("examhall.toml"),
        "[simulation]\nstudents = 6\nthink_time_ms = 0\nstrategy = \"all_correct\"\n",
    )
    .unwrap();
    let report_path = dir.path().join("report.json");

    examhall(&dir)
        .args(["simulate", "--output"])
        .arg(&report_path)
        .assert()
        .success();

    let report = read_report(&report_path);
    assert_eq!(report["completed_sessions"], 6);
    assert_eq!(report["average_score"].as_f64().unwrap(), 4.0);
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("examhall.toml"),
        "[simulation]\nstudents = 6\nthink_time_ms = 0\nstrategy = \"all_correct\"\n",
    )
    .unwrap();
    let report_path = dir.path().join("report.json");

    examhall(&dir)
        .args(["simulate", "--students", "3", "--strategy", "all_wrong", "--output"])
        .arg(&report_path)
        .assert()
        .success();

    let report = read_report(&report_path);
    assert_eq!(report["completed_sessions"], 3);
    assert_eq!(report["average_score"].as_f64().unwrap(), 0.0);
}

#[test]
fn simulate_rejects_unknown_strategy() {
    let dir = TempDir::new().unwrap();
    examhall(&dir)
        .args(["simulate", "--strategy", "random"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown answer strategy"));
}

#[test]
fn simulate_rejects_zero_parallelism() {
    let dir = TempDir::new().unwrap();
    examhall(&dir)
        .args(["simulate", "--parallelism", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parallelism must be at least 1"));
}

#[test]
fn simulate_rejects_oversized_parallelism() {
    let dir = TempDir::new().unwrap();
    examhall(&dir)
        .args(["simulate", "--students", "1", "--parallelism"])
        .arg(usize::MAX.to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parallelism must be at most"));
}

#[test]
fn simulate_missing_config_file() {
    let dir = TempDir::new().unwrap();
    examhall(&dir)
        .args(["simulate", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    examhall(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examhall.toml"));

    assert!(dir.path().join("examhall.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examhall(&dir).arg("init").assert().success();

    examhall(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
