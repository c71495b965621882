//! Opaque cursor tokens for cursor-based pagination
//!
//! A cursor token is the JSON form of [`CursorData`] encoded with the
//! URL-safe base64 alphabet (`-` and `_`, padded), so it can travel in a
//! query string without escaping. The JSON keys are `v` (value), `d`
//! (direction) and `e` (extra fields). `extra` is a sorted map, which makes
//! encoding deterministic.
//!
//! Tokens are neither signed nor encrypted. A decoded cursor is client input
//! like any other query parameter: bind its values, never interpolate them.
//!
//! # Example
//!
//! ```rust
//! use pageable::{decode_cursor, encode_cursor, CursorData, CursorDirection};
//!
//! let data = CursorData::new("42").with_extra("created_at", "2024-01-15T10:30:00Z");
//! let token = encode_cursor(&data)?;
//! assert!(!token.contains('+') && !token.contains('/'));
//!
//! let decoded = decode_cursor(&token)?;
//! assert_eq!(decoded, data);
//! assert_eq!(decoded.direction, CursorDirection::Next);
//! # Ok::<(), pageable::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use base64::{engine::general_purpose::URL_SAFE, Engine};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Traversal direction carried by a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorDirection {
    /// Items after the cursor
    // Tokens minted without a direction carry an empty tag.
    #[default]
    #[serde(alias = "")]
    Next,
    /// Items before the cursor
    Prev,
}

impl fmt::Display for CursorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
        }
    }
}

/// Payload embedded in a cursor token
///
/// `value` is the primary position (an ID, a timestamp). `extra` holds
/// tie-break fields for compound orderings such as `created_at, id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorData {
    /// Primary cursor value
    #[serde(rename = "v")]
    pub value: String,
    /// Whether this cursor pages forward or backward
    #[serde(rename = "d")]
    pub direction: CursorDirection,
    /// Additional ordering fields
    #[serde(rename = "e", deserialize_with = "nullable_map")]
    pub extra: BTreeMap<String, String>,
}

impl CursorData {
    /// Forward cursor positioned at `value`
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Set the traversal direction
    #[must_use]
    pub fn with_direction(mut self, direction: CursorDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Add a tie-break field
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Encode into an opaque token; see [`encode_cursor`]
    pub fn encode(&self) -> Result<String> {
        encode_cursor(self)
    }

    /// Decode an opaque token; see [`decode_cursor`]
    pub fn decode(token: &str) -> Result<Self> {
        decode_cursor(token)
    }
}

/// Encode cursor data into a URL-safe token
///
/// Identical input always yields an identical token.
pub fn encode_cursor(data: &CursorData) -> Result<String> {
    let json = serde_json::to_vec(data).map_err(Error::Encoding)?;
    Ok(URL_SAFE.encode(json))
}

/// Decode a token produced by [`encode_cursor`]
///
/// Fails with [`Error::InvalidEncoding`] when the token is not valid
/// URL-safe base64 and [`Error::InvalidCursorData`] when the decoded bytes
/// are not a cursor payload.
pub fn decode_cursor(token: &str) -> Result<CursorData> {
    let bytes = URL_SAFE.decode(token).map_err(|e| {
        tracing::debug!(error = %e, "rejecting cursor with invalid encoding");
        Error::InvalidEncoding(e)
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "rejecting cursor with invalid payload");
        Error::InvalidCursorData(e)
    })
}

fn nullable_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let values = [
            "123",
            "abc-def",
            "2024-01-15T10:30:00Z",
            "",
            "some/path/value",
            "unicode-日本語",
        ];

        for value in values {
            let token = encode_cursor(&CursorData::new(value)).unwrap();
            let decoded = decode_cursor(&token).unwrap();
            assert_eq!(decoded.value, value);
            assert_eq!(decoded.direction, CursorDirection::Next);
            assert!(decoded.extra.is_empty());
        }
    }

    #[test]
    fn test_cursor_round_trip_with_extra() {
        let data = CursorData::new("user-42")
            .with_direction(CursorDirection::Prev)
            .with_extra("created_at", "2024-01-15T10:30:00Z")
            .with_extra("name", "alice");

        let decoded = decode_cursor(&encode_cursor(&data).unwrap()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_encode_cursor_url_safe() {
        let data = CursorData::new("??>???").with_extra("k", "~~~");
        let token = encode_cursor(&data).unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_encode_cursor_deterministic() {
        let data = CursorData::new("test-123")
            .with_extra("b", "2")
            .with_extra("a", "1");
        let first = encode_cursor(&data).unwrap();
        let second = encode_cursor(&data.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_cursor_wire_format() {
        let token = encode_cursor(&CursorData::new("2")).unwrap();
        let json = URL_SAFE.decode(token).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"v":"2","d":"next","e":{}}"#
        );
    }

    #[test]
    fn test_decode_cursor_invalid_encoding() {
        let err = decode_cursor("!!!invalid!!!").unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding(_)));
    }

    #[test]
    fn test_decode_cursor_invalid_data() {
        let token = URL_SAFE.encode("not-json");
        let err = decode_cursor(&token).unwrap_err();
        assert!(matches!(err, Error::InvalidCursorData(_)));
    }

    #[test]
    fn test_decode_cursor_wrong_shape() {
        let token = URL_SAFE.encode(r#"{"v":123}"#);
        assert!(matches!(
            decode_cursor(&token),
            Err(Error::InvalidCursorData(_))
        ));

        let token = URL_SAFE.encode(r#"{"v":"1","d":"sideways"}"#);
        assert!(matches!(
            decode_cursor(&token),
            Err(Error::InvalidCursorData(_))
        ));
    }

    #[test]
    fn test_decode_cursor_accepts_null_extra_and_empty_direction() {
        let token = URL_SAFE.encode(r#"{"v":"7","d":"","e":null}"#);
        let decoded = decode_cursor(&token).unwrap();
        assert_eq!(decoded, CursorData::new("7"));
    }

    #[test]
    fn test_decode_cursor_missing_fields_default() {
        let token = URL_SAFE.encode(r#"{"v":"7"}"#);
        assert_eq!(decode_cursor(&token).unwrap(), CursorData::new("7"));
    }

    #[test]
    fn test_cursor_data_methods() {
        let data = CursorData::new("9").with_direction(CursorDirection::Prev);
        let token = data.encode().unwrap();
        assert_eq!(CursorData::decode(&token).unwrap(), data);
    }

    #[test]
    fn test_cursor_direction_display() {
        assert_eq!(CursorDirection::Next.to_string(), "next");
        assert_eq!(CursorDirection::Prev.to_string(), "prev");
    }
}
