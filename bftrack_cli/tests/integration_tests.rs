//! Integration tests for the bftrack binary.
//!
//! These tests verify end-to-end behavior including:
//! - Live estimation and the undefined-estimate outcome
//! - Daily record capture with upsert-per-date semantics
//! - Preference persistence across invocations
//! - Recovery from corrupted persisted state

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bftrack"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Body composition tracking with the U.S. Navy circumference method",
        ));
}

#[test]
fn test_estimate_male_defaults() {
    let temp_dir = setup_test_dir();

    // Default preferences are 170/38/80, male
    cli()
        .arg("estimate")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("13.69"));
}

#[test]
fn test_estimate_female_formula() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("estimate")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--sex")
        .arg("female")
        .assert()
        .success()
        .stdout(predicate::str::contains("28.47"));
}

#[test]
fn test_estimate_undefined_outcome_does_not_fail() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("estimate")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--neck")
        .arg("80")
        .arg("--waist")
        .arg("80")
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimate undefined"));
}

#[test]
fn test_record_persists_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded"));

    let records_path = temp_dir.path().join("records");
    let contents = fs::read_to_string(&records_path).expect("Failed to read records");
    assert!(contents.contains("bodyFat"));
    assert!(contents.contains("13.69"));
}

#[test]
fn test_record_twice_same_day_keeps_one_record() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--waist")
        .arg("82")
        .assert()
        .success();

    let contents = fs::read_to_string(temp_dir.path().join("records")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["waist"], 82.0);
}

#[test]
fn test_dry_run_does_not_record() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp_dir.path().join("records").exists());
}

#[test]
fn test_record_with_undefined_estimate_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--neck")
        .arg("90")
        .assert()
        .failure();

    assert!(!temp_dir.path().join("records").exists());
}

#[test]
fn test_preferences_prepopulate_next_invocation() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("estimate")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--height")
        .arg("180")
        .assert()
        .success();

    // No flags: height 180 comes back from preferences
    cli()
        .arg("estimate")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("11.95"));
}

#[test]
fn test_history_table_shows_records() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Body fat"))
        .stdout(predicate::str::contains("13.69"));
}

#[test]
fn test_history_chart() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--chart")
        .assert()
        .success()
        .stdout(predicate::str::contains("█"));
}

#[test]
fn test_empty_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No records yet"));
}

#[test]
fn test_corrupted_records_treated_as_empty() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("records"), "{ not json ]").unwrap();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No records yet"));

    // A capture over the corrupted state starts a fresh history
    cli()
        .arg("record")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let contents = fs::read_to_string(temp_dir.path().join("records")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 1);
}
