//! Cross-corpus type analysis.
//!
//! The analyzer ingests many parsed documents, accumulating per field
//! path the set of type tags observed and an occurrence count, then
//! derives a categorized issue report. Its findings feed the coercion
//! tables in [`crate::fields`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{envelope, tag::TypeTag, Result};

/// Fields present in less than this share of the corpus count as
/// sparsely present.
const SPARSE_THRESHOLD: f64 = 0.9;

/// An issue entry that carries the observed tag set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedIssue {
    pub field: String,
    pub types: Vec<TypeTag>,
    pub occurrences: u64,
    pub percentage: f64,
}

/// A field that is absent from a meaningful share of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseIssue {
    pub field: String,
    pub occurrences: u64,
    pub percentage: f64,
}

/// A field that was only ever observed as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullIssue {
    pub field: String,
    pub occurrences: u64,
}

/// Categorized findings for one analysis run. Built fresh from the
/// accumulated maps by [`CorpusAnalyzer::report`]; immutable once
/// produced. Each list is sorted descending by occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueReport {
    pub type_inconsistencies: Vec<TypedIssue>,
    pub numeric_as_string: Vec<TypedIssue>,
    pub boolean_as_string: Vec<TypedIssue>,
    pub missing_in_some_files: Vec<SparseIssue>,
    pub always_null: Vec<NullIssue>,
}

/// Machine-readable dump of a full analysis run, persisted next to the
/// text report for consumption by coercion-rule tuning.
#[derive(Debug, Serialize)]
pub struct AnalysisDetails<'a> {
    pub total_files: u64,
    pub issues: &'a IssueReport,
    pub field_types: &'a BTreeMap<String, BTreeSet<TypeTag>>,
}

/// Accumulates per-field type observations across many documents.
///
/// Lifecycle: construct once per run, [`observe`](Self::observe) each
/// parsed document, then [`report`](Self::report).
#[derive(Debug, Default)]
pub struct CorpusAnalyzer {
    field_types: BTreeMap<String, BTreeSet<TypeTag>>,
    field_occurrences: BTreeMap<String, u64>,
    total_files: u64,
}

impl CorpusAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents that contributed to the statistics.
    #[must_use]
    pub const fn total_files(&self) -> u64 {
        self.total_files
    }

    /// Full per-path tag map accumulated so far.
    #[must_use]
    pub const fn field_types(&self) -> &BTreeMap<String, BTreeSet<TypeTag>> {
        &self.field_types
    }

    /// Number of distinct field paths observed.
    #[must_use]
    pub fn unique_paths(&self) -> usize {
        self.field_types.len()
    }

    /// Ingest one parsed document, recording every field's path and type
    /// tag. Array indices are elided so observations aggregate across
    /// documents; scalar list elements are tracked under `path[]`.
    ///
    /// # Errors
    ///
    /// Structurally rejected documents contribute nothing to the
    /// statistics, not even to the file count.
    pub fn observe(&mut self, document: &Value) -> Result<()> {
        let data = envelope::payload(document)?;
        self.total_files += 1;
        self.walk_object(data, "hardware.data");
        Ok(())
    }

    fn walk_object(&mut self, object: &Map<String, Value>, path: &str) {
        for (key, value) in object {
            let field_path = format!("{path}.{key}");

            *self.field_occurrences.entry(field_path.clone()).or_insert(0) += 1;
            self.field_types
                .entry(field_path.clone())
                .or_default()
                .insert(TypeTag::of(value));

            match value {
                Value::Object(nested) => self.walk_object(nested, &field_path),
                Value::Array(items) => {
                    for item in items {
                        match item {
                            Value::Object(nested) => self.walk_object(nested, &field_path),
                            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                                self.field_types
                                    .entry(format!("{field_path}[]"))
                                    .or_default()
                                    .insert(TypeTag::of(item));
                            }
                            Value::Null | Value::Array(_) => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Derive the categorized issue report from the accumulated state.
    #[must_use]
    pub fn report(&self) -> IssueReport {
        let mut report = IssueReport::default();

        for (field_path, types) in &self.field_types {
            let occurrences = self
                .field_occurrences
                .get(field_path)
                .copied()
                .unwrap_or(0);
            let percentage = percentage(occurrences, self.total_files);
            let sorted_types = display_sorted(types);

            // Null is excluded from the conflict check: optional fields
            // represented as null are expected.
            let non_null = types.iter().filter(|tag| **tag != TypeTag::Null).count();
            if types.len() > 1 && non_null > 1 {
                report.type_inconsistencies.push(TypedIssue {
                    field: field_path.clone(),
                    types: sorted_types.clone(),
                    occurrences,
                    percentage,
                });
            }

            if types.contains(&TypeTag::NumericString) {
                report.numeric_as_string.push(TypedIssue {
                    field: field_path.clone(),
                    types: sorted_types.clone(),
                    occurrences,
                    percentage,
                });
            }

            if types.contains(&TypeTag::BooleanString) {
                report.boolean_as_string.push(TypedIssue {
                    field: field_path.clone(),
                    types: sorted_types,
                    occurrences,
                    percentage,
                });
            }

            // A field seen in a single file is noise, not a pattern.
            #[allow(clippy::cast_precision_loss)]
            if (occurrences as f64) < self.total_files as f64 * SPARSE_THRESHOLD
                && occurrences > 1
            {
                report.missing_in_some_files.push(SparseIssue {
                    field: field_path.clone(),
                    occurrences,
                    percentage,
                });
            }

            if types.len() == 1 && types.contains(&TypeTag::Null) {
                report.always_null.push(NullIssue {
                    field: field_path.clone(),
                    occurrences,
                });
            }
        }

        report.type_inconsistencies.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        report.numeric_as_string.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        report.boolean_as_string.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        report.missing_in_some_files.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        report.always_null.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));

        report
    }
}

fn display_sorted(types: &BTreeSet<TypeTag>) -> Vec<TypeTag> {
    let mut sorted: Vec<TypeTag> = types.iter().copied().collect();
    sorted.sort_by_key(ToString::to_string);
    sorted
}

#[allow(clippy::cast_precision_loss)]
fn percentage(occurrences: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (occurrences as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}
