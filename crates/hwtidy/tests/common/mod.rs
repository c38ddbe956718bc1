//! Shared helpers for CLI integration tests.

#![allow(dead_code)] // each test binary uses a subset

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use serde_json::{json, Value};

/// The hwtidy binary under test.
pub fn hwtidy() -> Command {
    Command::cargo_bin("hwtidy").expect("hwtidy binary builds")
}

/// Wrap inventory data in the collection envelope.
pub fn wrapped(data: Value) -> Value {
    json!({"hardware": {"node": "compute-01", "data": data, "error": ""}})
}

/// A small document with the usual type defects.
pub fn messy_document() -> Value {
    wrapped(json!({
        "id": "machine",
        "class": "system",
        "claimed": "true",
        "size": "512",
        "logicalname": "eth0",
        "capabilities": {"smp": "Symmetric Multi-Processing", "acpi": "not supported"}
    }))
}

/// A document that already has canonical types everywhere.
pub fn clean_document() -> Value {
    wrapped(json!({
        "id": "machine",
        "class": "system",
        "claimed": true,
        "cores": 8,
        "logicalname": ["eth0"],
        "physid": "0"
    }))
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serializable"))
        .expect("test file writes");
    path
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("file readable"))
        .expect("file holds JSON")
}
