//! Semantic type classification of JSON values.
//!
//! [`Category`] is the plain structural shape of a value. [`TypeTag`]
//! refines it by sniffing string content: a string that parses as a
//! number is tagged `string(numeric)`, a string spelling a boolean
//! literal is tagged `string(boolean)`. The numeric check runs first, so
//! `"1"` and `"0"` count as numeric strings even though they are also in
//! the boolean literal set.

use serde::Serialize;
use serde_json::Value;

/// Structural JSON category, without any string content sniffing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl Category {
    /// Structural category of a JSON value. Booleans are checked before
    /// numbers so they are never misclassified as integers.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// Semantic type tag of a value, as aggregated by the corpus analyzer.
///
/// The display names double as the serialization format in analysis
/// reports, so they stay stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display,
)]
pub enum TypeTag {
    #[serde(rename = "null")]
    #[strum(serialize = "null")]
    Null,
    #[serde(rename = "boolean")]
    #[strum(serialize = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    #[strum(serialize = "integer")]
    Integer,
    #[serde(rename = "float")]
    #[strum(serialize = "float")]
    Float,
    #[serde(rename = "string(numeric)")]
    #[strum(serialize = "string(numeric)")]
    NumericString,
    #[serde(rename = "string(boolean)")]
    #[strum(serialize = "string(boolean)")]
    BooleanString,
    #[serde(rename = "string")]
    #[strum(serialize = "string")]
    String,
    #[serde(rename = "array")]
    #[strum(serialize = "array")]
    Array,
    #[serde(rename = "object")]
    #[strum(serialize = "object")]
    Object,
}

impl TypeTag {
    /// Classify a JSON value. Total over the JSON value domain, no
    /// side effects.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(s) => Self::of_str(s),
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    fn of_str(s: &str) -> Self {
        if parse_integer(s).is_some() || parse_float(s).is_some() {
            Self::NumericString
        } else if is_boolean_literal(s) {
            Self::BooleanString
        } else {
            Self::String
        }
    }
}

/// String spellings that read as booleans. `1`/`0` are listed but in
/// practice the numeric check wins for them.
const BOOLEAN_LITERALS: &[&str] = &["true", "false", "yes", "no", "1", "0"];

/// Whether a string's lowercase trimmed form spells a boolean literal.
#[must_use]
pub fn is_boolean_literal(s: &str) -> bool {
    BOOLEAN_LITERALS.contains(&s.trim().to_lowercase().as_str())
}

/// Lenient signed integer parse: surrounding whitespace, a leading `+`
/// and leading zeros are all accepted, matching the upstream collector's
/// tolerance.
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

/// Lenient unsigned parse for magnitudes past `i64::MAX` (large `size`
/// values on big storage arrays).
#[must_use]
pub fn parse_unsigned(s: &str) -> Option<u64> {
    s.trim().parse::<u64>().ok()
}

/// Lenient float parse. Non-finite spellings (`inf`, `NaN`) are rejected
/// since JSON numbers cannot represent them.
#[must_use]
pub fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}
