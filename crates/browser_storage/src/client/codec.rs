//! Value encoding shared by the client and whatever it stored through the component.
//!
//! Stored strings are `<json>|<unix seconds>` or `<json>|` without expiry, so the
//! [`NULL_SENTINEL`](crate::NULL_SENTINEL) decodes to JSON `null` with no expiry.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Encodes a JSON value with an optional expiry suffix.
pub fn encode_value(value: &Value, expires_at: Option<DateTime<Utc>>) -> String {
    match expires_at {
        Some(expires_at) => format!("{value}|{}", expires_at.timestamp()),
        None => format!("{value}|"),
    }
}

/// Splits a stored string into its value and expiry.
///
/// A missing or malformed suffix leaves the text whole; text that is not JSON is returned as a
/// JSON string.
pub fn decode_value(raw: &str) -> (Value, Option<DateTime<Utc>>) {
    let (body, expires_at) = match raw.rfind('|') {
        Some(split) if raw[split + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            let suffix = &raw[split + 1..];
            let expires_at = suffix
                .parse::<i64>()
                .ok()
                .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single());
            (&raw[..split], expires_at)
        }
        _ => (raw, None),
    };
    let value =
        serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
    (value, expires_at)
}
