use serde::Serialize;
use serde_json::{Map, Value};

//
// ──────────────────────────────────────────────────────────
// Snapshot sanitization
// ──────────────────────────────────────────────────────────
//
// The repository stores plain data only. Sanitization re-expresses a
// snapshot as a JSON tree with every null object member removed, the
// serde analogue of stripping functions and `undefined` before storage.
// The transform is deterministic, hence idempotent.
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum SanitizeError {
    /// The snapshot did not serialize to plain data. The editor state
    /// machine must never produce such a value; callers report this as a
    /// storage failure rather than exposing it.
    #[error("Snapshot is not serializable: {0}")]
    NotSerializable(String),
}

/// Serialize a snapshot and scrub it for storage.
pub fn sanitize_snapshot<T: Serialize>(snapshot: &T) -> Result<Value, SanitizeError> {
    let value = serde_json::to_value(snapshot)
        .map_err(|e| SanitizeError::NotSerializable(e.to_string()))?;
    Ok(sanitize(value))
}

/// Drop null object members recursively; keep everything else, including
/// nulls inside arrays (those are positional data, not absent fields).
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let scrubbed: Map<String, Value> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, sanitize(v)))
                .collect();
            Value::Object(scrubbed)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        other => other,
    }
}
