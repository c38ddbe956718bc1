//! Command implementations shared helpers.

pub mod analyze;
pub mod normalize;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Section separator used by all human-readable reports.
pub(crate) const RULE: &str =
    "================================================================================";

/// How many offenders a report section shows before cutting off.
pub(crate) const TOP_OFFENDERS: usize = 20;

/// Display name of a path for per-file report lines.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Read and parse one JSON document.
pub(crate) fn read_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}
