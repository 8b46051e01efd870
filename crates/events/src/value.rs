//! Captured (raw) and storage (normalized) value types.
//!
//! Values arrive untyped from the capture stream. They are classified once, at
//! the wire boundary, into [`CapturedValue`] so normalization can match over a
//! closed set instead of probing JSON shapes.

use serde_json::{Value as JsonValue, json};

/// A raw value as captured from a monitored node.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    Null,
    Boolean(bool),
    Integer(i64),
    String(String),
    /// SNMP object identifier, carried on the wire as `{"oid": "<dotted>"}`.
    ///
    /// Any object with a string `oid` qualifies; other fields ride along in
    /// `raw` and are ignored by normalization.
    ObjectIdentifier { oid: String, raw: JsonValue },
    /// Any shape normalization does not understand (arrays, floats, other
    /// objects). Kept verbatim so the wire form survives re-encoding.
    Unrecognized(JsonValue),
}

impl CapturedValue {
    /// Classify a parsed JSON value. Never fails: unknown shapes become
    /// [`CapturedValue::Unrecognized`] and are rejected on normalization.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => CapturedValue::Null,
            JsonValue::Bool(b) => CapturedValue::Boolean(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => CapturedValue::Integer(i),
                None => CapturedValue::Unrecognized(value.clone()),
            },
            JsonValue::String(s) => CapturedValue::String(s.clone()),
            JsonValue::Object(map) => match map.get("oid") {
                Some(JsonValue::String(oid)) => CapturedValue::ObjectIdentifier {
                    oid: oid.clone(),
                    raw: value.clone(),
                },
                _ => CapturedValue::Unrecognized(value.clone()),
            },
            JsonValue::Array(_) => CapturedValue::Unrecognized(value.clone()),
        }
    }

    /// Bare `{"oid": ...}` identifier.
    pub fn object_identifier(oid: impl Into<String>) -> Self {
        let oid = oid.into();
        let raw = json!({ "oid": oid });
        CapturedValue::ObjectIdentifier { oid, raw }
    }

    /// Wire form, exactly as captured.
    pub fn to_json(&self) -> JsonValue {
        match self {
            CapturedValue::Null => JsonValue::Null,
            CapturedValue::Boolean(b) => JsonValue::Bool(*b),
            CapturedValue::Integer(i) => JsonValue::from(*i),
            CapturedValue::String(s) => JsonValue::String(s.clone()),
            CapturedValue::ObjectIdentifier { raw, .. } | CapturedValue::Unrecognized(raw) => {
                raw.clone()
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CapturedValue::Null => "null",
            CapturedValue::Boolean(_) => "bool",
            CapturedValue::Integer(_) => "int",
            CapturedValue::String(_) => "string",
            CapturedValue::ObjectIdentifier { .. } => "oid",
            CapturedValue::Unrecognized(raw) => match raw {
                JsonValue::Array(_) => "array",
                JsonValue::Object(_) => "object",
                JsonValue::Number(_) => "number",
                _ => "unknown",
            },
        }
    }
}

impl From<&JsonValue> for CapturedValue {
    fn from(value: &JsonValue) -> Self {
        CapturedValue::from_json(value)
    }
}

/// A normalized, storage-ready value.
///
/// Storage only knows strings, integers and null. Strings derived from UUID or
/// hex decoding are raw bytes and are not guaranteed to be valid UTF-8, so the
/// storage boundary must consume them through [`StorageValue::as_bytes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageValue {
    Null,
    Integer(i64),
    Text(String),
    Binary(Vec<u8>),
}

impl StorageValue {
    pub fn is_null(&self) -> bool {
        matches!(self, StorageValue::Null)
    }

    /// Byte view of string-like values (text or binary); `None` otherwise.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StorageValue::Text(s) => Some(s.as_bytes()),
            StorageValue::Binary(b) => Some(b),
            StorageValue::Null | StorageValue::Integer(_) => None,
        }
    }
}
