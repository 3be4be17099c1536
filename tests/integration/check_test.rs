//! Exit codes and report contents of `unitspec check`

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use super::{host, suites, unitspec};

#[test]
fn test_all_pass_exits_zero() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", &suites(), "--target", &host("healthy")])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Target: fixture:healthy"))
        .stdout(predicate::str::contains("14 expectations, 14 passed, 0 failed, 0 errors"));
}

#[test]
fn test_stopped_service_exits_one() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", &suites(), "--target", &host("stopped")])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("should be running"))
        .stdout(predicate::str::contains("expected true, got false"));
}

#[test]
fn test_unreachable_target_exits_two() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", &suites(), "--target", &host("unreachable")])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("accessor_connectivity"));
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let output = unitspec(temp.path())
        .args(["--json", "check", &suites(), "--target", &host("stopped")])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"], "fixture:stopped");
    assert_eq!(json["summary"]["total"], 14);
    assert_eq!(json["summary"]["failed"], 1);
    assert_eq!(json["cancelled"], false);

    let results = json["results"].as_array().unwrap();
    let indexes: Vec<u64> = results.iter().map(|r| r["index"].as_u64().unwrap()).collect();
    assert_eq!(indexes, (0..14).collect::<Vec<u64>>());
}

#[test]
fn test_run_timeout_cancels() {
    let temp = TempDir::new().unwrap();
    let slow = temp.path().join("slow.toml");
    fs::write(&slow, "name = \"slow\"\ndelay_ms = 10000\n").unwrap();

    unitspec(temp.path())
        .args(["check", &suites(), "--timeout", "1"])
        .arg("--target")
        .arg(format!("fixture:{}", slow.display()))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("cancelled"));
}

#[test]
fn test_config_file_supplies_target() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("unitspec.toml");
    fs::write(&config, format!("[run]\ntarget = {:?}\n", host("healthy"))).unwrap();

    unitspec(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["check", &suites()])
        .assert()
        .code(0);
}

// =============================================================================
// Load and configuration errors
// =============================================================================

#[test]
fn test_missing_suite_exits_three() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", "/nonexistent/suite.toml", "--target", &host("healthy")])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/nonexistent/suite.toml"));
}

#[test]
fn test_no_default_suites_exits_three() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", "--target", &host("healthy")])
        .current_dir(temp.path())
        .assert()
        .code(3);
}

#[test]
fn test_invalid_suite_exits_three() {
    let temp = TempDir::new().unwrap();
    let suite = temp.path().join("bad.toml");
    fs::write(&suite, "[[file]]\npath = \"/etc/motd\"\nmode = \"rw-r--r--\"\n").unwrap();

    unitspec(temp.path())
        .arg("check")
        .arg(&suite)
        .args(["--target", &host("healthy")])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("bad.toml"));
}

#[test]
fn test_unknown_target_exits_three() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", &suites(), "--target", "docker://web"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown target"));
}

#[test]
fn test_zero_jobs_exits_three() {
    let temp = TempDir::new().unwrap();
    unitspec(temp.path())
        .args(["check", &suites(), "--jobs", "0", "--target", &host("healthy")])
        .assert()
        .code(3);
}
