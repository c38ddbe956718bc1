//! Collection-envelope handling.
//!
//! Inventory documents arrive wrapped as
//! `{"hardware": {"node": ..., "data": {...}, "error": ...}}` and the
//! payload must carry both `id` and `class` keys to count as genuine
//! lshw output rather than arbitrary JSON.

use serde_json::{json, Map, Value};

use crate::{Error, Result};

/// Borrow the inventory payload out of a wrapped document.
///
/// # Errors
///
/// Returns a structural rejection when the envelope or payload object is
/// missing, or the payload lacks the `id`/`class` identity fields.
pub fn payload(document: &Value) -> Result<&Map<String, Value>> {
    let envelope = document
        .as_object()
        .and_then(|root| root.get("hardware"))
        .and_then(Value::as_object)
        .ok_or(Error::MissingEnvelope)?;

    let data = envelope
        .get("data")
        .and_then(Value::as_object)
        .ok_or(Error::MissingPayload)?;

    if data.contains_key("id") && data.contains_key("class") {
        Ok(data)
    } else {
        Err(Error::MissingIdentity)
    }
}

/// Whether a parsed document is wrapped inventory output.
#[must_use]
pub fn is_inventory(document: &Value) -> bool {
    payload(document).is_ok()
}

/// Rebuild the envelope around a rewritten payload. The node identifier
/// is preserved verbatim (null when absent) and a missing error string
/// is normalized to empty.
#[must_use]
pub fn rebuild(document: &Value, data: Value) -> Value {
    let envelope = document.get("hardware").and_then(Value::as_object);
    let node = envelope
        .and_then(|e| e.get("node"))
        .cloned()
        .unwrap_or(Value::Null);
    let error = envelope
        .and_then(|e| e.get("error"))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));

    json!({
        "hardware": {
            "node": node,
            "data": data,
            "error": error,
        }
    })
}
