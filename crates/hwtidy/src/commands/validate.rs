//! Validate command: per-file pass/fail against the expected-type table.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use hwtidy_core::validate::Validator;
use serde_json::Value;
use tracing::warn;

use crate::{
    commands::{file_name, RULE, TOP_OFFENDERS},
    discover::{collect_json_files, Expansion},
};

/// Validate command options
#[derive(Debug, Clone)]
pub struct Options {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl Options {
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            paths: matches
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            output: matches.get_one::<PathBuf>("output").cloned(),
            strict: matches.get_flag("strict"),
        }
    }
}

/// Run the validate command
///
/// # Errors
///
/// Returns an error when the report file cannot be written. Unreadable
/// or malformed input files count as validated-and-failed and never
/// abort the run.
pub fn run(options: &Options) -> Result<ExitCode> {
    let files = collect_json_files(&options.paths, Expansion::TopLevel)?;
    if files.is_empty() {
        eprintln!("No JSON files found!");
        return Ok(ExitCode::FAILURE);
    }
    println!("Validating {} files...", files.len());
    println!();

    let mut validator = Validator::new();
    let mut skipped = 0_u64;
    for file in &files {
        skipped += validate_file(&mut validator, file);
    }

    print_summary(&validator, skipped);

    if let Some(output) = &options.output {
        let report = validator.report();
        fs::write(output, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!();
        println!("Detailed report saved to: {}", output.display());
    }

    let has_failures = validator.files_failed() > 0;
    let has_warnings = !validator.warnings().is_empty();
    Ok(if has_failures || (options.strict && has_warnings) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Validate one file, printing its outcome line. Returns 1 when the
/// file was structurally rejected (not inventory output).
fn validate_file(validator: &mut Validator, path: &Path) -> u64 {
    let name = file_name(path);

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("✗ FAIL: {name} - Error: {error}");
            validator.record_file_error(path.display().to_string(), error.to_string());
            return 0;
        }
    };
    let document: Value = match serde_json::from_str(&text) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("✗ FAIL: {name} - Invalid JSON: {error}");
            validator
                .record_file_error(path.display().to_string(), format!("Invalid JSON: {error}"));
            return 0;
        }
    };

    let errors_before = validator.errors().len();
    let warnings_before = validator.warnings().len();
    match validator.validate(&document) {
        Ok(true) => {
            println!("✓ PASS: {name}");
            0
        }
        Ok(false) => {
            let errors = validator.errors().len() - errors_before;
            let warnings = validator.warnings().len() - warnings_before;
            println!("✗ FAIL ({errors} errors, {warnings} warnings): {name}");
            0
        }
        Err(shape) => {
            warn!(file = %path.display(), reason = %shape, "not inventory output, skipped");
            eprintln!("- SKIP: {name} - {shape}");
            1
        }
    }
}

fn print_summary(validator: &Validator, skipped: u64) {
    println!();
    println!("{RULE}");
    println!("Validation Summary");
    println!("{RULE}");
    println!("Files validated: {}", validator.files_validated());
    println!("Files passed: {}", validator.files_passed());
    println!("Files failed: {}", validator.files_failed());
    if skipped > 0 {
        println!("Files skipped (not inventory): {skipped}");
    }
    println!(
        "Total errors: {}",
        validator.errors().len() + validator.file_errors().len()
    );
    println!("Total warnings: {}", validator.warnings().len());

    if !validator.file_errors().is_empty() {
        println!();
        println!("{RULE}");
        println!("File errors");
        println!("{RULE}");
        for file_error in validator.file_errors().iter().take(TOP_OFFENDERS) {
            println!();
            println!("File: {}", file_error.file);
            println!("   Error: {}", file_error.error);
        }
    }

    if !validator.errors().is_empty() {
        println!();
        println!("{RULE}");
        println!("Errors (showing first {TOP_OFFENDERS})");
        println!("{RULE}");
        for (index, error) in validator.errors().iter().take(TOP_OFFENDERS).enumerate() {
            println!();
            println!("{}. Path: {}", index + 1, error.path);
            println!("   Field: {}", error.field);
            println!("   Expected: {}", error.expected_type);
            println!("   Actual: {}", error.actual_type);
            println!("   Value: {}", error.value);
        }
    }

    if !validator.warnings().is_empty() {
        println!();
        println!("{RULE}");
        println!("Warnings (showing first {TOP_OFFENDERS})");
        println!("{RULE}");
        for (index, warning) in validator.warnings().iter().take(TOP_OFFENDERS).enumerate() {
            println!();
            println!("{}. Path: {}", index + 1, warning.path);
            println!("   Issue: {}", warning.issue);
            println!("   Value: {}", warning.value);
            println!("   Suggestion: {}", warning.suggestion);
        }
    }
}
