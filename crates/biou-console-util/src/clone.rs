// crates/biou-console-util/src/clone.rs
// ============================================================================
// Module: Deep Clone
// Description: Structural duplication of JSON-like values.
// Purpose: Give editors a private copy of server records before mutation.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Server records are handled as [`serde_json::Value`] trees. An owned value
//! tree cannot contain a cycle, so duplication is a plain recursive walk.
//! Timestamps travel as strings in this model and are copied as scalars.

use serde_json::Map;
use serde_json::Value;

/// Recursively duplicates `value`; the result shares no storage with it.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        Value::Object(fields) => {
            let mut copy = Map::with_capacity(fields.len());
            for (key, field) in fields {
                copy.insert(key.clone(), deep_clone(field));
            }
            Value::Object(copy)
        }
        scalar => scalar.clone(),
    }
}
