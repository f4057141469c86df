// crates/biou-console-util/src/json.rs
// ============================================================================
// Module: Lenient JSON Decoding
// Description: Parse persisted JSON strings with a caller-supplied fallback.
// Purpose: Keep corrupted preference/session entries from breaking startup.
// Dependencies: serde, serde_json
// ============================================================================

use serde::de::DeserializeOwned;

/// Parses `raw` as JSON, returning `default` for absent or malformed input.
///
/// Empty strings and the literals `null` and `undefined` count as absent.
#[must_use]
pub fn safe_json_parse<T: DeserializeOwned>(raw: Option<&str>, default: T) -> T {
    let Some(text) = raw.map(str::trim) else {
        return default;
    };
    if text.is_empty() || text == "null" || text == "undefined" {
        return default;
    }
    serde_json::from_str(text).unwrap_or(default)
}
