//! Document normalization: rewrite known fields to canonical types.
//!
//! The walker applies per-field coercion rules in a fixed precedence
//! order (structural special cases first, then the boolean and numeric
//! field tables) and leaves everything it does not recognize untouched.
//! A value that cannot be parsed into its target type passes through
//! unchanged rather than being guessed at.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{envelope, fields, tag, Result};

/// Running counters and per-file records for one normalization run.
/// Purely observational; the coercion logic never reads them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeStats {
    pub files_processed: u64,
    pub files_modified: u64,
    pub files_skipped: u64,
    pub numeric_conversions: u64,
    pub boolean_conversions: u64,
    pub array_normalizations: u64,
    pub errors: Vec<String>,
    pub skipped_files: Vec<String>,
}

/// Outcome of normalizing one accepted document.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The rewritten document, envelope included.
    pub document: Value,
    /// Whether the rewrite differs from the input.
    pub modified: bool,
}

/// Rewrites documents so known numeric, boolean and array fields carry
/// canonical types. One instance owns the accumulated statistics for
/// the duration of a run.
#[derive(Debug, Default)]
pub struct Normalizer {
    stats: NormalizeStats,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics accumulated so far in this run.
    #[must_use]
    pub const fn stats(&self) -> &NormalizeStats {
        &self.stats
    }

    /// Record a structurally rejected file.
    pub fn record_skipped(&mut self, file: impl Into<String>) {
        self.stats.files_skipped += 1;
        self.stats.skipped_files.push(file.into());
    }

    /// Record a hard per-file processing error.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.stats.errors.push(message.into());
    }

    /// Normalize one parsed document, returning the rewritten envelope
    /// and whether anything changed.
    ///
    /// # Errors
    ///
    /// Structural rejection when the document is not wrapped inventory
    /// output; such documents are skipped wholesale, never partially
    /// rewritten.
    pub fn normalize(&mut self, document: &Value) -> Result<Normalized> {
        let data = envelope::payload(document)?;
        let normalized = self.normalize_object(data);
        let rebuilt = envelope::rebuild(document, Value::Object(normalized));

        let modified = *document != rebuilt;
        self.stats.files_processed += 1;
        if modified {
            self.stats.files_modified += 1;
        }

        Ok(Normalized {
            document: rebuilt,
            modified,
        })
    }

    fn normalize_object(&mut self, object: &Map<String, Value>) -> Map<String, Value> {
        let mut normalized = Map::with_capacity(object.len());
        for (key, value) in object {
            let rewritten = match (key.as_str(), value) {
                ("configuration", Value::Object(config)) => {
                    Value::Object(self.normalize_configuration(config))
                }
                ("capabilities", Value::Object(capabilities)) => {
                    Value::Object(self.normalize_capabilities(capabilities))
                }
                ("logicalname", _) => self.normalize_logicalname(value),
                // Sometimes emitted as bare numbers upstream, but must
                // round-trip as strings for cross-document consistency.
                ("physid" | "version", _) => stringify(value),
                (name, _) if fields::is_boolean_field(name) => self.coerce_boolean(value),
                (name, _) if fields::is_numeric_field(name) => self.coerce_numeric(name, value),
                (_, Value::Object(nested)) => Value::Object(self.normalize_object(nested)),
                (_, Value::Array(items)) => Value::Array(self.normalize_array(items)),
                _ => value.clone(),
            };
            normalized.insert(key.clone(), rewritten);
        }
        normalized
    }

    fn normalize_array(&mut self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(nested) => Value::Object(self.normalize_object(nested)),
                Value::Array(inner) => Value::Array(self.normalize_array(inner)),
                scalar => scalar.clone(),
            })
            .collect()
    }

    /// Configuration blocks use the same field tables as the main walk
    /// but never recurse; unknown attributes pass through.
    fn normalize_configuration(&mut self, config: &Map<String, Value>) -> Map<String, Value> {
        config
            .iter()
            .map(|(key, value)| {
                let rewritten = if fields::is_boolean_field(key) {
                    self.coerce_boolean(value)
                } else if fields::is_numeric_field(key) {
                    self.coerce_numeric(key, value)
                } else {
                    value.clone()
                };
                (key.clone(), rewritten)
            })
            .collect()
    }

    fn normalize_capabilities(&mut self, capabilities: &Map<String, Value>) -> Map<String, Value> {
        capabilities
            .iter()
            .map(|(key, value)| {
                let rewritten = if fields::is_boolean_capability(key) || value.is_boolean() {
                    match value {
                        Value::String(text) => self.capability_from_text(text),
                        other => other.clone(),
                    }
                } else {
                    value.clone()
                };
                (key.clone(), rewritten)
            })
            .collect()
    }

    /// Explicit literals coerce directly; free-text descriptions read as
    /// affirmative unless a negative marker appears.
    fn capability_from_text(&mut self, text: &str) -> Value {
        let lowered = text.trim().to_lowercase();
        if let "true" | "false" | "yes" | "no" | "1" | "0" = lowered.as_str() {
            if let Some(flag) = boolean_literal(&lowered) {
                self.stats.boolean_conversions += 1;
                return Value::Bool(flag);
            }
        }

        let negative = fields::NEGATIVE_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker));
        self.stats.boolean_conversions += 1;
        Value::Bool(!negative)
    }

    /// `logicalname` canonicalizes to a list; unexpected shapes are not
    /// coerced.
    fn normalize_logicalname(&mut self, value: &Value) -> Value {
        match value {
            Value::Array(_) => value.clone(),
            Value::String(name) => {
                self.stats.array_normalizations += 1;
                Value::Array(vec![Value::String(name.clone())])
            }
            other => other.clone(),
        }
    }

    fn coerce_boolean(&mut self, value: &Value) -> Value {
        match value {
            Value::String(text) => match boolean_literal(text) {
                Some(flag) => {
                    self.stats.boolean_conversions += 1;
                    Value::Bool(flag)
                }
                // Unrecognized spellings are preserved, never dropped.
                None => value.clone(),
            },
            Value::Number(number) => Value::Bool(!number_is_zero(number)),
            _ => value.clone(),
        }
    }

    fn coerce_numeric(&mut self, field: &str, value: &Value) -> Value {
        let Value::String(text) = value else {
            return value.clone();
        };

        if let Some(parsed) = tag::parse_integer(text) {
            // Format-lossy spellings like "007" or "+5" stay strings and
            // deliberately do not fall through to the float rule.
            if parsed.to_string() == *text {
                self.stats.numeric_conversions += 1;
                return Value::Number(parsed.into());
            }
            debug!(field, value = %text, "integer spelling does not round-trip, kept as string");
            return value.clone();
        }

        if let Some(parsed) = tag::parse_unsigned(text) {
            if parsed.to_string() == *text {
                self.stats.numeric_conversions += 1;
                return Value::Number(parsed.into());
            }
            return value.clone();
        }

        if let Some(parsed) = tag::parse_float(text) {
            if let Some(number) = Number::from_f64(parsed) {
                self.stats.numeric_conversions += 1;
                return Value::Number(number);
            }
        }

        debug!(field, value = %text, "numeric field left unchanged");
        value.clone()
    }
}

/// Boolean spellings accepted by the coercion rule, wider than the
/// classifier's literal set.
fn boolean_literal(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn stringify(value: &Value) -> Value {
    match value {
        Value::Null | Value::String(_) => value.clone(),
        Value::Number(number) => Value::String(number.to_string()),
        Value::Bool(flag) => Value::String(flag.to_string()),
        // Structured values are left alone rather than flattened.
        other => other.clone(),
    }
}

#[allow(clippy::float_cmp)]
fn number_is_zero(number: &Number) -> bool {
    if let Some(integer) = number.as_i64() {
        return integer == 0;
    }
    if let Some(unsigned) = number.as_u64() {
        return unsigned == 0;
    }
    number.as_f64().is_some_and(|float| float == 0.0)
}
