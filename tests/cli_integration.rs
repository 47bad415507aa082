//! CLI integration tests for slipway.
//!
//! These tests verify the CLI workflow from platform detection through
//! staged installation.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Run slipway inside the directory, with HOME pointed there so a global
/// `~/.slipway` config on the host cannot leak into the test.
fn in_dir(tmp: &TempDir) -> Command {
    let mut cmd = slipway();
    cmd.current_dir(tmp.path()).env("HOME", tmp.path());
    cmd
}

// ============================================================================
// slipway detect
// ============================================================================

#[test]
fn test_detect_identifies_host() {
    let tmp = temp_dir();

    in_dir(&tmp)
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identified"))
        .stdout(predicate::str::contains("platform"));
}

#[test]
fn test_detect_json_output() {
    let tmp = temp_dir();

    in_dir(&tmp)
        .args(["detect", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"variant\""))
        .stdout(predicate::str::contains("\"os_name\""));
}

#[test]
fn test_detect_is_stable_across_invocations() {
    let tmp = temp_dir();

    let first = in_dir(&tmp).arg("detect").output().unwrap();
    let second = in_dir(&tmp).arg("detect").output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// ============================================================================
// slipway stage
// ============================================================================

#[test]
fn test_stage_show_unconfigured() {
    let tmp = temp_dir();

    in_dir(&tmp)
        .args(["stage", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured"));
}

#[test]
fn test_stage_set_then_show() {
    let tmp = temp_dir();
    let stage = tmp.path().join("stage");

    in_dir(&tmp)
        .args(["stage", "set", "--dir"])
        .arg(&stage)
        .assert()
        .success();

    assert!(tmp.path().join(".slipway/config.toml").exists());

    in_dir(&tmp)
        .args(["stage", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stage"))
        .stdout(predicate::str::contains("iplt"));
}

#[test]
fn test_stage_install_requires_configuration() {
    let tmp = temp_dir();
    fs::write(tmp.path().join("tool"), "binary").unwrap();

    in_dir(&tmp)
        .args(["stage", "install", "--kind", "exe", "tool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging root not configured"));
}

#[test]
fn test_stage_install_header_round_trip() {
    let tmp = temp_dir();
    let stage = tmp.path().join("stage");
    fs::write(tmp.path().join("grid.hpp"), "#pragma once").unwrap();

    in_dir(&tmp)
        .args(["stage", "set", "--dir"])
        .arg(&stage)
        .assert()
        .success();

    in_dir(&tmp)
        .args(["stage", "install", "--kind", "header", "--into", "img", "grid.hpp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("installed"));

    let staged = stage.join("include/iplt/img/grid.hpp");
    assert!(staged.exists());
    assert_eq!(fs::read_to_string(staged).unwrap(), "#pragma once");
}

#[test]
fn test_stage_install_executable_with_project_override() {
    let tmp = temp_dir();
    let stage = tmp.path().join("stage");
    fs::write(tmp.path().join("viewer"), "").unwrap();

    in_dir(&tmp)
        .args(["stage", "set", "--project", "estar", "--dir"])
        .arg(&stage)
        .assert()
        .success();

    in_dir(&tmp)
        .args(["stage", "install", "--kind", "exe", "viewer"])
        .assert()
        .success();

    assert!(stage.join("bin/viewer").exists());
}

// ============================================================================
// slipway doctor / completions
// ============================================================================

#[test]
fn test_doctor_reports_platform_check() {
    let tmp = temp_dir();

    // Doctor's exit code depends on what the host has installed; only the
    // report content is asserted.
    let output = in_dir(&tmp).arg("doctor").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("platform"));
    assert!(stdout.contains("compiler"));
    assert!(stdout.contains("staging"));
}

#[test]
fn test_doctor_json_output() {
    let tmp = temp_dir();

    let output = in_dir(&tmp).args(["doctor", "--json"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"checks\""));
}

#[test]
fn test_completions_bash() {
    slipway()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slipway"));
}
