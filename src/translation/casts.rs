/*!
 * Value casts for locale values of translatable attributes.
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde_json::Value;

use crate::model::AttributeCast;

/// Storage format of `datetime` values
pub const STORED_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage format of `date` values
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Loose truthiness: null, false, zero, "", "0" and [] are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Parse a stored or user-supplied value as a date/time
///
/// Accepts the common textual forms, RFC 3339 and unix timestamps.
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.naive_utc());
            }
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(text, STORED_DATE_FORMAT)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|parsed| parsed.naive_utc()),
        _ => None,
    }
}

/// Cast a stored value for reading
///
/// Returns `None` for values that are dropped from the read result.
pub fn cast_for_read(cast: AttributeCast, value: &Value) -> Option<Value> {
    match cast {
        AttributeCast::Json => Some(match value {
            Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| value.clone()),
            other => other.clone(),
        }),
        _ if cast.is_date() && value.is_null() => None,
        AttributeCast::Date => Some(
            parse_datetime(value)
                .map(|parsed| Value::String(parsed.date().format(STORED_DATE_FORMAT).to_string()))
                .unwrap_or_else(|| value.clone()),
        ),
        AttributeCast::DateTime => Some(
            parse_datetime(value)
                .map(|parsed| Value::String(parsed.format("%Y-%m-%dT%H:%M:%S").to_string()))
                .unwrap_or_else(|| value.clone()),
        ),
    }
}

/// Cast an incoming value for storage
pub fn cast_for_write(cast: AttributeCast, value: Value) -> Result<Value, serde_json::Error> {
    match cast {
        AttributeCast::Json if value.is_null() => Ok(value),
        AttributeCast::Json => Ok(Value::String(serde_json::to_string(&value)?)),
        _ if cast.is_date() && !is_truthy(&value) => Ok(value),
        AttributeCast::Date | AttributeCast::DateTime => {
            let format = if cast == AttributeCast::Date {
                STORED_DATE_FORMAT
            } else {
                STORED_DATETIME_FORMAT
            };
            match parse_datetime(&value) {
                Some(parsed) => Ok(Value::String(parsed.format(format).to_string())),
                None => {
                    warn!("Storing unparseable {} value as-is: {}", cast, value);
                    Ok(value)
                }
            }
        }
    }
}
