/*!
 * Locale map codec.
 *
 * A translatable attribute stores its translations as one JSON object keyed by
 * locale. This module converts between that raw column value and the in-memory
 * `LocaleMap`. Locale order is preserved as stored (serde_json `preserve_order`).
 */

use log::debug;
use serde_json::{Map, Value};

use crate::errors::DecodeError;

/// Locale code to translated value
pub type LocaleMap = Map<String, Value>;

/// Name of the JSON kind of a value, for diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode serialized text into a locale map
///
/// Empty or whitespace-only text is an empty map.
pub fn try_decode_str(raw: &str) -> Result<LocaleMap, DecodeError> {
    if raw.trim().is_empty() {
        return Ok(LocaleMap::new());
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DecodeError::NotAnObject(json_kind(&other))),
        Err(e) => Err(DecodeError::InvalidJson(e.to_string())),
    }
}

/// Decode a raw attribute value into a locale map, reporting why it is not one
pub fn try_decode(raw: Option<&Value>) -> Result<LocaleMap, DecodeError> {
    match raw {
        None | Some(Value::Null) => Ok(LocaleMap::new()),
        Some(Value::String(text)) => try_decode_str(text),
        // Already decoded by the caller
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::Array(_)) => Err(DecodeError::NotAnObject("array")),
        Some(other) => Err(DecodeError::UnsupportedType(json_kind(other))),
    }
}

/// Decode a raw attribute value, treating malformed content as an empty map
pub fn decode(raw: Option<&Value>) -> LocaleMap {
    try_decode(raw).unwrap_or_else(|e| {
        debug!("Ignoring undecodable translations: {}", e);
        LocaleMap::new()
    })
}

/// Encode a locale map into its stored text form
///
/// Non-ASCII characters are written as-is, not as `\u` escapes.
pub fn encode(map: &LocaleMap) -> Result<String, serde_json::Error> {
    serde_json::to_string(map)
}

/// Whether a raw value holds a serialized object
pub fn is_json_object(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::String(text)) => {
            matches!(serde_json::from_str::<Value>(text), Ok(Value::Object(_)))
        }
        Some(Value::Object(_)) => true,
        _ => false,
    }
}
