//! End-to-end checks of the poolwizard binary that need no running node

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn poolwizard(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("poolwizard").unwrap();
    cmd.env("POOLWIZARD_DATA_DIR", data_dir.path())
        .env_remove("RPC_URL")
        .env_remove("PRIVATE_KEY")
        .env_remove("POOL_ADDRESS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("poolwizard"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("mint"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("poolwizard --help"));
}

#[test]
fn test_config_creates_settings_file() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pool address:"))
        .stdout(predicate::str::contains("RPC URL:     not set"));

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn test_config_keeps_existing_settings() {
    let dir = TempDir::new().unwrap();
    let custom = r#"{"pool_address": "0x00000000000000000000000000000000000000aa"}"#;
    std::fs::write(dir.path().join("config.json"), custom).unwrap();

    poolwizard(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0x00000000000000000000000000000000000000aa",
        ));

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert_eq!(written, custom);
}

#[test]
fn test_status_without_connection_settings_fails() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize contract"));
}

#[test]
fn test_invalid_pool_address_is_rejected() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .args(["--pool", "not-an-address", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pool address"));
}

#[test]
fn test_reset_works_offline() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wizard progress cleared"));
}

#[test]
fn test_activity_with_empty_log() {
    let dir = TempDir::new().unwrap();
    poolwizard(&dir)
        .arg("activity")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded."));
}
