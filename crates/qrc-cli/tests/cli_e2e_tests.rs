//! CLI end-to-end tests that invoke the compiled `qrc-check` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use qrc_test_utils::{TestProject, qrc};

/// Get a Command for the qrc-check binary
fn qrc_check() -> Command {
    Command::cargo_bin("qrc-check").expect("Failed to find qrc-check binary")
}

fn sample_app() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects/sample-app")
}

/// A project with one used, one unused, one missing and one orphan resource.
fn mixed_project() -> TestProject {
    let project = TestProject::new();
    project.resources(&["icons/used.png", "icons/unused.png", "stray.jpg"]);
    project.file(
        "app.qrc",
        &qrc(&[("/", &["icons/used.png", "icons/unused.png", "icons/gone.png"])]),
    );
    project.file("src/main.cpp", "QIcon(\":/icons/used.png\");\n");
    project
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_help_exits_zero() {
    qrc_check()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_version_flag() {
    qrc_check()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qrc-check"));
}

#[test]
fn test_no_command_shows_hint() {
    qrc_check()
        .assert()
        .success()
        .stdout(predicate::str::contains("qrc-check --help"));
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn test_scan_table_output() {
    let project = mixed_project();

    qrc_check()
        .args(["scan", "-m", "app.qrc"])
        .current_dir(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains(":/icons/used.png"))
        .stdout(predicate::str::contains("src/main.cpp:1"))
        .stdout(predicate::str::contains("stray.jpg"))
        .stdout(predicate::str::contains("4 resources"));
}

#[test]
fn test_scan_json_output() {
    let project = mixed_project();

    let output = qrc_check()
        .args(["scan", "--json", "-m", "app.qrc"])
        .current_dir(project.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = report["records"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    let gone = records
        .iter()
        .find(|r| r["manifest_path"] == ":/icons/gone.png")
        .unwrap();
    assert_eq!(gone["exists_on_disk"], false);
    assert_eq!(gone["manifest_index"], 0);
}

#[test]
fn test_scan_only_missing() {
    let project = mixed_project();

    qrc_check()
        .args(["scan", "-m", "app.qrc", "--only", "missing"])
        .current_dir(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains(":/icons/gone.png"))
        .stdout(predicate::str::contains(":/icons/used.png").not());
}

#[test]
fn test_scan_explicit_root_and_resource_filter() {
    let project = mixed_project();
    let root = project.root().to_str().unwrap().to_string();
    let manifest = project.path("app.qrc").to_str().unwrap().to_string();

    let output = qrc_check()
        .args(["scan", &root, "-m", &manifest, "-r", "*.png", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // stray.jpg no longer matches the resource filter.
    assert_eq!(report["records"].as_array().unwrap().len(), 3);
}

#[test]
fn test_scan_with_config_file() {
    qrc_check()
        .args(["scan", "--config", "checker.toml", "--only", "orphan"])
        .current_dir(sample_app())
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy.svg"));
}

#[test]
fn test_scan_missing_root_fails() {
    let project = TestProject::new();

    qrc_check()
        .args(["scan", "does-not-exist", "-m", "app.qrc"])
        .current_dir(project.root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_scan_without_manifest_fails() {
    let project = TestProject::new();

    qrc_check()
        .arg("scan")
        .current_dir(project.root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No manifest given"));
}

#[test]
fn test_scan_invalid_pattern_fails() {
    let project = mixed_project();

    qrc_check()
        .args(["scan", "-m", "app.qrc", "-r", "{a"])
        .current_dir(project.root())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_scan_diagnostics_do_not_fail() {
    let project = TestProject::new();
    project.file("broken.qrc", "<RCC><qresource><file>a.png</file></qresource></RCC>");

    qrc_check()
        .args(["scan", "-m", "broken.qrc", "-m", "absent.qrc"])
        .current_dir(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Diagnostics"))
        .stdout(predicate::str::contains("prefix"));
}

#[test]
fn test_json_stdout_is_clean_with_verbose() {
    let project = mixed_project();

    let output = qrc_check()
        .args(["scan", "-v", "--json", "-m", "app.qrc"])
        .current_dir(project.root())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
    assert!(!output.stderr.is_empty());
}
