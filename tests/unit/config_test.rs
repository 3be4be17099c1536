//! Tests for configuration management

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use unitspec::config::Config;

// =============================================================================
// BASIC CONFIG TESTS
// =============================================================================

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.run.target, "local");
    assert_eq!(config.run.timeout_secs, None);
    assert_eq!(config.systemd.systemctl, "systemctl");
    assert_eq!(config.ssh.program, "ssh");
    assert_eq!(config.accounts.passwd, PathBuf::from("/etc/passwd"));
}

#[test]
fn test_run_options_from_config() {
    let mut config = Config::default();
    config.run.jobs = 0;
    config.run.timeout_secs = Some(30);
    config.run.accessor_timeout_secs = 3;

    let options = config.run_options();
    assert_eq!(options.jobs, 1);
    assert_eq!(options.run_timeout, Some(Duration::from_secs(30)));
    assert_eq!(options.accessor_timeout, Duration::from_secs(3));
}

// =============================================================================
// FILE TESTS
// =============================================================================

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[run]\ntarget = \"ssh://web-1\"\n\n[ssh]\nprogram = \"/usr/bin/ssh\"\n")
        .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.run.target, "ssh://web-1");
    assert_eq!(config.run.jobs, 4);
    assert_eq!(config.ssh.program, "/usr/bin/ssh");
    assert_eq!(config.ssh.options, vec!["-o", "BatchMode=yes"]);
}

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/config.toml");

    let mut config = Config::default();
    config.run.timeout_secs = Some(120);
    config.systemd.systemctl = "/bin/systemctl".to_string();
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_invalid_config_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[run]\njobs = \"many\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}
