//! Field-level type validation against the expectation table.
//!
//! The validator mirrors the analyzer's structural walk but keeps
//! literal array indices in paths, so a defect can be located inside a
//! specific document. Expectation mismatches are errors; string values
//! that merely read as booleans or numbers are warnings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    envelope, fields,
    tag::{self, Category},
    Result,
};

/// Reported values are truncated to keep reports readable.
const VALUE_PREVIEW_CHARS: usize = 50;

/// One recorded type error: a non-null value whose structural category
/// is outside the field's acceptable tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeError {
    pub path: String,
    pub field: String,
    pub expected_type: String,
    pub actual_type: String,
    pub value: String,
}

/// Why a warning fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WarningKind {
    StringBoolean,
    StringNumeric,
}

/// One recorded should-convert warning. Warnings never fail a document
/// on their own; callers may opt into treating them as failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeWarning {
    pub path: String,
    pub field: String,
    pub issue: WarningKind,
    pub value: String,
    pub suggestion: &'static str,
}

/// A file that could not be validated at all (unreadable or not JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file: String,
    pub error: String,
}

/// Aggregate counters for one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub files_validated: u64,
    pub files_passed: u64,
    pub files_failed: u64,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Full machine-readable validation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub file_errors: Vec<FileError>,
    pub errors: Vec<TypeError>,
    pub warnings: Vec<TypeWarning>,
}

/// Checks documents against the expected-type table, accumulating
/// itemized errors and warnings across many files for batch reporting.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<TypeError>,
    warnings: Vec<TypeWarning>,
    file_errors: Vec<FileError>,
    files_validated: u64,
    files_passed: u64,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[TypeWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn file_errors(&self) -> &[FileError] {
        &self.file_errors
    }

    #[must_use]
    pub const fn files_validated(&self) -> u64 {
        self.files_validated
    }

    #[must_use]
    pub const fn files_passed(&self) -> u64 {
        self.files_passed
    }

    #[must_use]
    pub const fn files_failed(&self) -> u64 {
        self.files_validated - self.files_passed
    }

    /// Record a file that failed before validation could run (I/O or
    /// JSON parse failure). Counts as validated-and-failed.
    pub fn record_file_error(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.files_validated += 1;
        self.file_errors.push(FileError {
            file: file.into(),
            error: error.into(),
        });
    }

    /// Validate one parsed document. Returns whether the document is
    /// valid; itemized records accumulate as an observable side effect.
    ///
    /// # Errors
    ///
    /// Structural rejection when the document is not wrapped inventory
    /// output; rejected documents are excluded from pass/fail counts
    /// and field statistics.
    pub fn validate(&mut self, document: &Value) -> Result<bool> {
        let data = envelope::payload(document)?;
        self.files_validated += 1;

        let errors_before = self.errors.len();
        self.walk_object(data, "hardware.data");

        let valid = self.errors.len() == errors_before;
        if valid {
            self.files_passed += 1;
        }
        Ok(valid)
    }

    /// Build the machine-readable report for the run so far.
    #[must_use]
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            summary: ValidationSummary {
                files_validated: self.files_validated,
                files_passed: self.files_passed,
                files_failed: self.files_failed(),
                total_errors: self.errors.len() + self.file_errors.len(),
                total_warnings: self.warnings.len(),
            },
            file_errors: self.file_errors.clone(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }

    fn walk_object(&mut self, object: &Map<String, Value>, path: &str) {
        for (key, value) in object {
            let field_path = format!("{path}.{key}");

            if let Some(expected) = fields::expected_categories(key) {
                self.check_type(value, key, expected, &field_path);
            }
            if fields::BOOLEAN_WARNING_FIELDS.contains(&key.as_str()) {
                self.check_boolean_string(value, key, &field_path);
            }
            if fields::NUMERIC_WARNING_FIELDS.contains(&key.as_str()) {
                self.check_numeric_string(value, key, &field_path);
            }

            match value {
                Value::Object(nested) => self.walk_object(nested, &field_path),
                Value::Array(items) => self.walk_items(items, &field_path),
                _ => {}
            }
        }
    }

    fn walk_items(&mut self, items: &[Value], path: &str) {
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{index}]");
            match item {
                Value::Object(nested) => self.walk_object(nested, &item_path),
                Value::Array(nested) => self.walk_items(nested, &item_path),
                _ => {}
            }
        }
    }

    fn check_type(&mut self, value: &Value, field: &str, expected: &[Category], path: &str) {
        // Null is always acceptable: optional-field convention.
        if value.is_null() {
            return;
        }

        let actual = Category::of(value);
        if !expected.contains(&actual) {
            let expected_type = expected
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            self.errors.push(TypeError {
                path: path.to_string(),
                field: field.to_string(),
                expected_type,
                actual_type: actual.to_string(),
                value: preview(value),
            });
        }
    }

    fn check_boolean_string(&mut self, value: &Value, field: &str, path: &str) {
        let Value::String(text) = value else { return };
        if tag::is_boolean_literal(text) {
            self.warnings.push(TypeWarning {
                path: path.to_string(),
                field: field.to_string(),
                issue: WarningKind::StringBoolean,
                value: text.clone(),
                suggestion: "Convert to boolean type",
            });
        }
    }

    fn check_numeric_string(&mut self, value: &Value, field: &str, path: &str) {
        let Value::String(text) = value else { return };
        let Some(expected) = fields::expected_categories(field) else {
            return;
        };

        // Integer-expecting fields only consider integer spellings, so
        // "1.5" in a cores field stays an error, not a warning.
        let parses = if expected.contains(&Category::Integer) {
            tag::parse_integer(text).is_some() || tag::parse_unsigned(text).is_some()
        } else if expected.contains(&Category::Float) {
            tag::parse_float(text).is_some()
        } else {
            false
        };

        if parses {
            self.warnings.push(TypeWarning {
                path: path.to_string(),
                field: field.to_string(),
                issue: WarningKind::StringNumeric,
                value: text.clone(),
                suggestion: "Convert to numeric type",
            });
        }
    }
}

/// Truncated display form of a value for reports. Strings render bare,
/// everything else as compact JSON.
fn preview(value: &Value) -> String {
    let rendered = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    rendered.chars().take(VALUE_PREVIEW_CHARS).collect()
}
