//! Normalize command: rewrite inventory files with canonical types.
//!
//! Directories expand recursively here, unlike analyze/validate: the
//! normalizer is the tool that sweeps whole collection trees.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::ArgMatches;
use hwtidy_core::normalize::{NormalizeStats, Normalizer};
use tracing::warn;

use crate::{
    commands::{file_name, read_document, RULE},
    discover::{collect_json_files, Expansion},
};

/// Filename prefix some collectors prepend to raw dumps; stripped when
/// copying originals.
const EXTRA_PREFIX: &str = "dci-extra.";

/// Normalize command options
#[derive(Debug, Clone)]
pub struct Options {
    pub paths: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
    pub suffix: String,
    pub copy_originals: bool,
}

impl Options {
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            paths: matches
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
            strict: matches.get_flag("strict"),
            suffix: matches
                .get_one::<String>("suffix")
                .cloned()
                .unwrap_or_default(),
            copy_originals: matches.get_flag("copy-originals"),
        }
    }
}

/// Run the normalize command
///
/// # Errors
///
/// Returns an error when the output directory cannot be created, a copy
/// fails, or (in strict mode) any file fails to process. Outside strict
/// mode per-file failures are recorded and the run continues.
pub fn run(options: &Options) -> Result<ExitCode> {
    if let Some(dir) = &options.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let files = collect_json_files(&options.paths, Expansion::Recursive)?;
    if files.is_empty() {
        eprintln!("No JSON files found!");
        return Ok(ExitCode::FAILURE);
    }

    if options.copy_originals {
        if let Some(dir) = &options.output_dir {
            copy_originals(&files, dir)?;
        }
    }

    println!();
    println!("Normalizing {} files...", files.len());

    let mut normalizer = Normalizer::new();
    for input in &files {
        println!("Processing: {}...", file_name(input));
        if let Err(error) = process_file(&mut normalizer, input, options) {
            let message = format!("Error processing {}: {error:#}", input.display());
            normalizer.record_error(message.clone());
            eprintln!("{message}");
            if options.strict {
                print_stats(normalizer.stats());
                return Err(error.context("strict mode: aborting on first error"));
            }
        }
    }

    print_stats(normalizer.stats());

    Ok(if normalizer.stats().errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn process_file(normalizer: &mut Normalizer, input: &Path, options: &Options) -> Result<()> {
    let document = read_document(input)?;

    let normalized = match normalizer.normalize(&document) {
        Ok(normalized) => normalized,
        Err(shape) => {
            normalizer.record_skipped(input.display().to_string());
            warn!(file = %input.display(), reason = %shape, "not inventory output, skipped");
            eprintln!(
                "Skipping {}: Not a valid lshw output ({shape})",
                file_name(input)
            );
            return Ok(());
        }
    };

    let output = match &options.output_dir {
        Some(dir) => output_path(dir, input, &options.suffix),
        None => input.to_path_buf(),
    };
    let text = serde_json::to_string_pretty(&normalized.document)?;
    fs::write(&output, text).with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

/// Output location inside the output directory; the optional suffix
/// slots in before the `.json` extension.
fn output_path(dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let name = file_name(input);
    if suffix.is_empty() {
        dir.join(name)
    } else {
        let stem = name.strip_suffix(".json").unwrap_or(&name);
        dir.join(format!("{stem}{suffix}.json"))
    }
}

fn copy_originals(files: &[PathBuf], dir: &Path) -> Result<()> {
    println!("Copying {} original files to {}...", files.len(), dir.display());
    for input in files {
        let name = file_name(input);
        let output_name = name.strip_prefix(EXTRA_PREFIX).unwrap_or(&name);
        let target = dir.join(output_name);
        fs::copy(input, &target).with_context(|| {
            format!("failed to copy {} to {}", input.display(), target.display())
        })?;
        println!("  Copied: {name} -> {output_name}");
    }
    Ok(())
}

fn print_stats(stats: &NormalizeStats) {
    println!();
    println!("{RULE}");
    println!("Normalization Statistics");
    println!("{RULE}");
    println!("Files processed: {}", stats.files_processed);
    println!("Files modified: {}", stats.files_modified);
    println!("Files skipped (invalid lshw): {}", stats.files_skipped);
    println!("Numeric conversions: {}", stats.numeric_conversions);
    println!("Boolean conversions: {}", stats.boolean_conversions);
    println!("Array normalizations: {}", stats.array_normalizations);

    if !stats.skipped_files.is_empty() {
        println!();
        println!("Skipped files ({}):", stats.skipped_files.len());
        for skipped in stats.skipped_files.iter().take(10) {
            println!("  - {skipped}");
        }
        if stats.skipped_files.len() > 10 {
            println!("  ... and {} more", stats.skipped_files.len() - 10);
        }
    }

    if !stats.errors.is_empty() {
        println!();
        println!("Errors encountered: {}", stats.errors.len());
        for error in stats.errors.iter().take(10) {
            println!("  - {error}");
        }
    }
}
