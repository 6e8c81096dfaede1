//! Scans of the checked-in sample project

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use qrc_core::{CheckerConfig, Classification, ScanEngine, ScanReport};

fn sample_app() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects/sample-app")
}

fn scan_sample() -> ScanReport {
    let config = CheckerConfig::load(&sample_app().join("checker.toml")).unwrap();
    let request = config.into_request().unwrap();
    ScanEngine::new(request).unwrap().run()
}

fn classify(report: &ScanReport, manifest_path: &str) -> Classification {
    report.find(manifest_path).unwrap().classification()
}

#[test]
fn test_sample_app_classifications() {
    let report = scan_sample();

    assert_eq!(classify(&report, ":/icons/open.png"), Classification::Used);
    assert_eq!(classify(&report, ":/icons/save.png"), Classification::Used);
    assert_eq!(classify(&report, ":/icons/missing.png"), Classification::Missing);
    assert_eq!(classify(&report, ":/splash/images/splash.png"), Classification::Unused);
    assert_eq!(classify(&report, ":/icons/prnt.png"), Classification::Missing);

    let orphans: Vec<_> = report.records_with(Classification::Orphan).collect();
    assert_eq!(orphans.len(), 1);
    assert!(orphans[0]
        .disk_path
        .as_ref()
        .unwrap()
        .as_str()
        .ends_with("resources/icons/legacy.svg"));
}

#[test]
fn test_sample_app_reference_locations() {
    let report = scan_sample();

    let open = report.find(":/icons/open.png").unwrap();
    let location = open.first_reference.as_ref().unwrap();
    assert!(location.file.as_str().ends_with("src/mainwindow.cpp"));
    assert_eq!(location.line, 7);

    let save = report.find(":/icons/save.png").unwrap();
    let location = save.first_reference.as_ref().unwrap();
    assert!(location.file.as_str().ends_with("src/mainwindow.ui"));
    assert_eq!(location.line, 8);

    assert_eq!(
        report.find(":/icons/prnt.png").unwrap().first_reference.as_ref().unwrap().line,
        10
    );
}

#[test]
fn test_sample_app_summary() {
    let summary = scan_sample().summary();

    assert_eq!(summary.total, 6);
    assert_eq!(summary.used, 2);
    assert_eq!(summary.unused, 1);
    assert_eq!(summary.missing, 2);
    assert_eq!(summary.orphan, 1);
    assert_eq!(summary.dangling, 1);
    assert_eq!(summary.errors + summary.warnings, 0);
}

#[test]
fn test_sample_app_report_serializes() {
    let report = scan_sample();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["records"].as_array().unwrap().len(), 6);
    assert!(json["root"].as_str().unwrap().ends_with("sample-app"));
}
