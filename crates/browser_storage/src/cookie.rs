//! Cookie string encoding for the `document.cookie` backend.
//!
//! Writes always use the root path and strict same-site policy; removal repeats both so the
//! browser matches the cookie that was written.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::StorageError;

/// Medium name reported in cookie errors.
pub const COOKIE_MEDIUM: &str = "document.cookie";

/// Path attribute applied to every cookie this component writes.
pub const COOKIE_PATH: &str = "/";

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
const REMOVAL_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Checks that `name` is an RFC 6265 token (no separators, whitespace or controls).
///
/// # Errors
///
/// Returns [`StorageError::InvalidName`] for empty or non-token names.
pub fn validate_cookie_name(name: &str) -> Result<(), StorageError> {
    let is_token = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if is_token {
        Ok(())
    } else {
        Err(StorageError::InvalidName {
            medium: COOKIE_MEDIUM,
            name: name.to_string(),
        })
    }
}

/// Builds the assignment string for writing `name=value`.
///
/// `expires` of `None` produces a session cookie.
///
/// # Errors
///
/// Returns [`StorageError::InvalidName`] when `name` is not a cookie token.
pub fn format_set_cookie(
    name: &str,
    value: &str,
    expires: Option<DateTime<Utc>>,
) -> Result<String, StorageError> {
    validate_cookie_name(name)?;
    let mut cookie = format!("{name}={}; Path={COOKIE_PATH}", encode_component(value));
    if let Some(expires) = expires {
        cookie.push_str("; Expires=");
        cookie.push_str(&expires.format(IMF_FIXDATE).to_string());
    }
    cookie.push_str("; SameSite=Strict");
    Ok(cookie)
}

/// Builds the assignment string that removes `name`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidName`] when `name` is not a cookie token.
pub fn format_remove_cookie(name: &str) -> Result<String, StorageError> {
    validate_cookie_name(name)?;
    Ok(format!(
        "{name}=; Max-Age=0; Path={COOKIE_PATH}; Expires={REMOVAL_EXPIRES}; SameSite=Strict"
    ))
}

/// Parses a `document.cookie` header (`a=1; b=2`) into a name-to-value mapping.
///
/// The first occurrence of a name wins, matching the most specific path the browser lists first.
pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || cookies.contains_key(name) {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(value);
        cookies.insert(name.to_string(), decode_component(value));
    }
    cookies
}

/// Percent-encodes with `encodeURIComponent` rules.
pub fn encode_component(raw: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::encode_uri_component(raw))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        native::encode_component(raw)
    }
}

/// Reverses [`encode_component`]. Malformed escapes leave the input untouched.
pub fn decode_component(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }

    #[cfg(target_arch = "wasm32")]
    {
        js_sys::decode_uri_component(raw)
            .map(String::from)
            .unwrap_or_else(|_| raw.to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        native::decode_component(raw)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    pub(super) fn encode_component(raw: &str) -> String {
        let mut encoded = String::with_capacity(raw.len());
        for byte in raw.bytes() {
            if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
                encoded.push(byte as char);
            } else {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
        encoded
    }

    pub(super) fn decode_component(raw: &str) -> String {
        let bytes = raw.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut index = 0;
        while index < bytes.len() {
            if bytes[index] == b'%' {
                let Some(byte) = bytes
                    .get(index + 1..index + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                else {
                    return raw.to_string();
                };
                decoded.push(byte);
                index += 3;
            } else {
                decoded.push(bytes[index]);
                index += 1;
            }
        }
        String::from_utf8(decoded).unwrap_or_else(|_| raw.to_string())
    }
}
