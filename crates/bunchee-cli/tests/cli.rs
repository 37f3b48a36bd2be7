//! Binary-level tests for the `bunchee` executable.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn bunchee() -> Command {
    let mut cmd = Command::cargo_bin("bunchee").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    bunchee()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_short_help_flag() {
    bunchee()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bunchee"))
        .stdout(predicate::str::contains("--no-external"));
}

#[test]
fn test_missing_source_exits_with_no_input() {
    let temp = TempDir::new().unwrap();

    bunchee()
        .current_dir(temp.path())
        .arg("src/missing.ts")
        .assert()
        .code(66)
        .stdout(predicate::str::contains("Usage: bunchee"))
        .stdout(predicate::str::contains("Finished in").not())
        .stderr(predicate::str::contains("Entry point not found"));
}

#[test]
fn test_empty_project_exits_with_no_input() {
    let temp = TempDir::new().unwrap();

    bunchee()
        .args(["--cwd", temp.path().to_str().unwrap()])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("No entry point found"));
}

#[test]
fn test_output_without_value_is_a_usage_error() {
    bunchee()
        .arg("--output")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage: bunchee"));
}

#[test]
fn test_unknown_format_is_a_usage_error() {
    bunchee()
        .args(["--format", "xyz", "src/index.ts"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_flag_is_treated_as_source() {
    let temp = TempDir::new().unwrap();

    bunchee()
        .current_dir(temp.path())
        .arg("--frobnicate")
        .assert()
        .code(66);
}
