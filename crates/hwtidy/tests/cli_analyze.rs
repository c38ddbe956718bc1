//! Integration tests for `hwtidy analyze`.

mod common;

use common::{hwtidy, read_json, write_json, wrapped};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn mixed_types_show_up_in_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.txt");
    write_json(
        dir.path(),
        "host1.json",
        &wrapped(json!({"id": "m", "class": "system", "size": 512})),
    );
    write_json(
        dir.path(),
        "host2.json",
        &wrapped(json!({"id": "m", "class": "system", "size": "512"})),
    );

    hwtidy()
        .args(["analyze"])
        .arg(dir.path())
        .arg("-o")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully analyzed 2/2 files"));

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("TYPE INCONSISTENCIES (HIGH PRIORITY)"));
    assert!(report.contains("Field: hardware.data.size"));
    assert!(report.contains("NUMERIC VALUES AS STRINGS (MEDIUM PRIORITY)"));

    // the machine-readable dump lands next to the report
    let details = read_json(&dir.path().join("analysis_details.json"));
    assert_eq!(details["total_files"], json!(2));
    assert_eq!(
        details["issues"]["numeric_as_string"][0]["field"],
        json!("hardware.data.size")
    );
    let size_tags = details["field_types"]["hardware.data.size"]
        .as_array()
        .unwrap();
    assert!(size_tags.contains(&json!("integer")));
    assert!(size_tags.contains(&json!("string(numeric)")));
}

#[test]
fn report_prints_to_stdout_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        dir.path(),
        "host1.json",
        &wrapped(json!({"id": "m", "class": "system", "claimed": "yes"})),
    );

    hwtidy()
        .args(["analyze"])
        .arg(dir.path())
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LSHW JSON Type Analysis Report"))
        .stdout(predicate::str::contains("BOOLEAN VALUES AS STRINGS"));

    assert!(dir.path().join("analysis_details.json").is_file());
}

#[test]
fn non_inventory_files_are_reported_and_excluded() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "notes.json", &json!({"foo": 1}));
    write_json(
        dir.path(),
        "host1.json",
        &wrapped(json!({"id": "m", "class": "system"})),
    );
    let report_path = dir.path().join("report.txt");

    hwtidy()
        .args(["analyze"])
        .arg(dir.path())
        .arg("-o")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully analyzed 1/2 files"))
        .stderr(predicate::str::contains("notes.json"));

    let details = read_json(&dir.path().join("analysis_details.json"));
    assert_eq!(details["total_files"], json!(1));
}

#[test]
fn no_inputs_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    hwtidy()
        .args(["analyze"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No JSON files found!"));
}
