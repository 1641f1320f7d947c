// Drives the compiled binary against a throwaway data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studynest(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studynest").unwrap();
    cmd.arg("--data-dir")
        .arg(home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn timer_run_records_a_session() {
    let home = TempDir::new().unwrap();

    studynest(&home)
        .args([
            "-o", "json", "timer", "run", "--work", "1", "--break", "1", "--cycles", "1",
            "--tick-ms", "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sessionsRecorded\": 1"));

    studynest(&home)
        .args(["-o", "json", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalSessions\": 1"))
        .stdout(predicate::str::contains("\"totalMinutes\": 1"));
}

#[test]
fn task_add_then_list() {
    let home = TempDir::new().unwrap();

    studynest(&home)
        .args(["task", "add", "Read", "chapter", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read chapter 3"));

    studynest(&home)
        .args(["-o", "json", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("Read chapter 3"));
}

#[test]
fn blank_task_is_rejected() {
    let home = TempDir::new().unwrap();

    studynest(&home)
        .args(["task", "add", "  "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Task text cannot be empty"));
}

#[test]
fn settings_set_and_show() {
    let home = TempDir::new().unwrap();

    studynest(&home)
        .args(["settings", "set", "work-duration", "45"])
        .assert()
        .success();

    studynest(&home)
        .args(["-o", "json", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workDuration\": 45"));

    studynest(&home)
        .args(["settings", "set", "volume", "7"])
        .assert()
        .failure();
}

#[test]
fn import_without_version_changes_nothing() {
    let home = TempDir::new().unwrap();
    studynest(&home).args(["task", "add", "Keep me"]).assert().success();

    let file = home.path().join("bad.json");
    std::fs::write(&file, r#"{"tasks": [], "settings": {"workDuration": 50}}"#).unwrap();

    studynest(&home)
        .arg("import")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Import failed"));

    studynest(&home)
        .args(["-o", "json", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"));
}

#[test]
fn export_then_import_round_trip() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let file = source.path().join("backup.json");

    studynest(&source).args(["task", "add", "Carry over"]).assert().success();
    studynest(&source)
        .arg("export")
        .arg("--out")
        .arg(&file)
        .assert()
        .success();

    studynest(&target)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported successfully"));

    studynest(&target)
        .args(["task", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carry over"));
}

#[test]
fn completions_need_no_data_dir() {
    Command::cargo_bin("studynest")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studynest"));
}

#[test]
fn writes_log_file() {
    let home = TempDir::new().unwrap();
    studynest(&home).args(["task", "add", "Logged"]).assert().success();

    let logs: Vec<_> = std::fs::read_dir(home.path().join("logs")).unwrap().collect();
    assert!(!logs.is_empty());
}

#[test]
fn verbose_reports_schema_and_keys() {
    let home = TempDir::new().unwrap();
    studynest(&home).args(["task", "add", "Logged"]).assert().success();

    studynest(&home)
        .env("RUST_LOG", "studynest=debug")
        .args(["--verbose", "task", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("schema=1"))
        .stderr(predicate::str::contains("keys=[\"studynest_tasks\"]"));
}
