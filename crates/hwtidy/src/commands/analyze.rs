//! Analyze command: corpus-wide type inconsistency report.
//!
//! Prints (or writes) the human-readable report and always persists the
//! machine-readable `analysis_details.json` next to it, for consumption
//! by coercion-rule tuning.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use hwtidy_core::analyze::{AnalysisDetails, CorpusAnalyzer, IssueReport, TypedIssue};
use itertools::Itertools;

use crate::{
    commands::{file_name, read_document, RULE, TOP_OFFENDERS},
    discover::{collect_json_files, Expansion},
};

/// Analyze command options
#[derive(Debug, Clone)]
pub struct Options {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
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
        }
    }
}

/// Run the analyze command
///
/// # Errors
///
/// Returns an error when the report or details file cannot be written.
/// Per-file read/parse failures are reported and skipped.
pub fn run(options: &Options) -> Result<ExitCode> {
    let files = collect_json_files(&options.paths, Expansion::TopLevel)?;
    if files.is_empty() {
        eprintln!("No JSON files found!");
        return Ok(ExitCode::FAILURE);
    }
    println!("Analyzing {} files...", files.len());

    let mut analyzer = CorpusAnalyzer::new();
    let mut succeeded = 0_usize;
    for file in &files {
        match observe_file(&mut analyzer, file) {
            Ok(()) => succeeded += 1,
            Err(error) => eprintln!("Error processing {}: {error:#}", file.display()),
        }
    }
    println!("Successfully analyzed {succeeded}/{} files", files.len());
    println!();

    let report = analyzer.report();
    let text = render_report(&analyzer, &report);
    if let Some(output) = &options.output {
        fs::write(output, &text)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Report written to: {}", output.display());
    } else {
        println!("{text}");
    }

    let details_path = details_path(options.output.as_deref());
    let details = AnalysisDetails {
        total_files: analyzer.total_files(),
        issues: &report,
        field_types: analyzer.field_types(),
    };
    fs::write(&details_path, serde_json::to_string_pretty(&details)?)
        .with_context(|| format!("failed to write {}", details_path.display()))?;
    println!("Detailed analysis saved to: {}", details_path.display());

    Ok(ExitCode::SUCCESS)
}

fn observe_file(analyzer: &mut CorpusAnalyzer, path: &Path) -> Result<()> {
    let document = read_document(path)?;
    analyzer
        .observe(&document)
        .with_context(|| format!("{} skipped", file_name(path)))?;
    Ok(())
}

/// The details dump lands next to the text report, or in the working
/// directory when the report goes to stdout.
fn details_path(output: Option<&Path>) -> PathBuf {
    output.and_then(Path::parent).map_or_else(
        || PathBuf::from("analysis_details.json"),
        |dir| dir.join("analysis_details.json"),
    )
}

fn render_report(analyzer: &CorpusAnalyzer, report: &IssueReport) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "LSHW JSON Type Analysis Report".to_string(),
        RULE.to_string(),
        String::new(),
        format!("Total files analyzed: {}", analyzer.total_files()),
        format!("Total unique field paths: {}", analyzer.unique_paths()),
        String::new(),
    ];

    push_typed_section(
        &mut lines,
        "TYPE INCONSISTENCIES (HIGH PRIORITY)",
        &format!(
            "Found {} fields with inconsistent types:",
            report.type_inconsistencies.len()
        ),
        &report.type_inconsistencies,
    );
    push_typed_section(
        &mut lines,
        "NUMERIC VALUES AS STRINGS (MEDIUM PRIORITY)",
        &format!(
            "Found {} fields with numeric strings:",
            report.numeric_as_string.len()
        ),
        &report.numeric_as_string,
    );
    push_typed_section(
        &mut lines,
        "BOOLEAN VALUES AS STRINGS (MEDIUM PRIORITY)",
        &format!(
            "Found {} fields with boolean strings:",
            report.boolean_as_string.len()
        ),
        &report.boolean_as_string,
    );

    if !report.missing_in_some_files.is_empty() {
        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push("FIELDS MISSING IN SOME FILES (LOW PRIORITY)".to_string());
        lines.push(RULE.to_string());
        lines.push(format!(
            "Found {} fields not present in all files:",
            report.missing_in_some_files.len()
        ));
        lines.push(String::new());
        for item in report.missing_in_some_files.iter().take(TOP_OFFENDERS) {
            lines.push(format!("  Field: {}", item.field));
            lines.push(format!(
                "    Present in: {}/{} files ({}%)",
                item.occurrences,
                analyzer.total_files(),
                item.percentage
            ));
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("SUMMARY".to_string());
    lines.push(RULE.to_string());
    lines.push(format!(
        "Type inconsistencies: {}",
        report.type_inconsistencies.len()
    ));
    lines.push(format!("Numeric as string: {}", report.numeric_as_string.len()));
    lines.push(format!("Boolean as string: {}", report.boolean_as_string.len()));
    lines.push(format!(
        "Missing in some files: {}",
        report.missing_in_some_files.len()
    ));
    lines.push(format!("Always null: {}", report.always_null.len()));
    lines.push(String::new());

    lines.join("\n")
}

fn push_typed_section(lines: &mut Vec<String>, title: &str, found: &str, issues: &[TypedIssue]) {
    if issues.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push(title.to_string());
    lines.push(RULE.to_string());
    lines.push(found.to_string());
    lines.push(String::new());
    for item in issues.iter().take(TOP_OFFENDERS) {
        lines.push(format!("  Field: {}", item.field));
        lines.push(format!(
            "    Types found: {}",
            item.types.iter().join(", ")
        ));
        lines.push(format!(
            "    Occurrences: {} ({}%)",
            item.occurrences, item.percentage
        ));
        lines.push(String::new());
    }
}
