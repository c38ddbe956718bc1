//! Integration tests for `hwtidy normalize`.

mod common;

use std::fs;

use common::{clean_document, hwtidy, messy_document, read_json, write_json, wrapped};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn rewrites_types_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "host1.json", &messy_document());

    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files modified: 1"))
        .stdout(predicate::str::contains("Numeric conversions: 1"));

    let data = &read_json(&input)["hardware"]["data"];
    assert_eq!(data["claimed"], json!(true));
    assert_eq!(data["size"], json!(512));
    assert_eq!(data["logicalname"], json!(["eth0"]));
    assert_eq!(data["capabilities"]["smp"], json!(true));
    assert_eq!(data["capabilities"]["acpi"], json!(false));
}

#[test]
fn second_run_is_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "host1.json", &messy_document());

    hwtidy().args(["normalize"]).arg(dir.path()).assert().success();
    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files modified: 0"));
}

#[test]
fn invalid_documents_are_skipped_not_failed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "notes.json", &json!({"foo": 1}));
    let before = fs::read_to_string(&input).unwrap();

    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files skipped (invalid lshw): 1"))
        .stderr(predicate::str::contains("Skipping notes.json"));

    // skipped files are never rewritten, not even reformatted
    assert_eq!(fs::read_to_string(&input).unwrap(), before);
}

#[test]
fn output_dir_and_suffix_name_the_rewrites() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clean");
    write_json(dir.path(), "host1.json", &messy_document());

    hwtidy()
        .args(["normalize"])
        .arg(dir.path().join("host1.json"))
        .arg("-o")
        .arg(&out)
        .args(["--suffix", ".norm"])
        .assert()
        .success();

    let rewritten = out.join("host1.norm.json");
    assert!(rewritten.is_file());
    assert_eq!(
        read_json(&rewritten)["hardware"]["data"]["size"],
        json!(512)
    );
}

#[test]
fn copy_originals_strips_the_extra_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("clean");
    write_json(dir.path(), "dci-extra.host1.json", &messy_document());

    hwtidy()
        .args(["normalize"])
        .arg(dir.path().join("dci-extra.host1.json"))
        .arg("-o")
        .arg(&out)
        .arg("--copy-originals")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Copied: dci-extra.host1.json -> host1.json",
        ));

    // verbatim copy without the prefix, normalized file keeps its name
    let copy = &read_json(&out.join("host1.json"))["hardware"]["data"];
    assert_eq!(copy["size"], json!("512"));
    let normalized = &read_json(&out.join("dci-extra.host1.json"))["hardware"]["data"];
    assert_eq!(normalized["size"], json!(512));
}

#[test]
fn malformed_json_fails_the_run_but_not_other_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    let good = write_json(dir.path(), "host1.json", &messy_document());

    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Errors encountered: 1"));

    // the good file was still processed
    assert_eq!(read_json(&good)["hardware"]["data"]["size"], json!(512));
}

#[test]
fn strict_mode_aborts_on_first_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    write_json(dir.path(), "host1.json", &clean_document());

    hwtidy()
        .args(["normalize", "--strict"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn directories_expand_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("rack1")).unwrap();
    write_json(&dir.path().join("rack1"), "host1.json", &messy_document());

    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 1"));
}

#[test]
fn no_inputs_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No JSON files found!"));
}

#[test]
fn missing_envelope_error_string_is_backfilled() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        dir.path(),
        "host1.json",
        &json!({"hardware": {"node": "n", "data": {"id": "m", "class": "system"}}}),
    );

    hwtidy().args(["normalize"]).arg(dir.path()).assert().success();

    assert_eq!(read_json(&input)["hardware"]["error"], json!(""));
}

#[test]
fn untouched_envelope_survives() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(dir.path(), "host1.json", &wrapped(json!({
        "id": "machine", "class": "system", "vendor": "Acme"
    })));

    hwtidy()
        .args(["normalize"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files modified: 0"));

    assert_eq!(read_json(&input)["hardware"]["node"], json!("compute-01"));
}
