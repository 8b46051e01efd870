//! Error model shared by the decoding and normalization layers.

use thiserror::Error;

/// Result type used across the inventory domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Every variant is terminal for the operation that raised it. Callers (ingest
/// pipeline, storage writer) decide whether to retry, skip or dead-letter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A wire record was missing or mistyped a field, carried an unknown
    /// action tag, or held malformed UUID text.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A `0x`-prefixed value did not hold an even number of hex digits.
    #[error("hex decode failed for `{property}` ({value}): {reason}")]
    HexDecode {
        property: String,
        value: String,
        reason: String,
    },

    /// A captured value has a shape normalization does not know about.
    #[error("invalid value for `{property}`: {kind} {value}")]
    InvalidValue {
        property: String,
        /// JSON rendering of the offending value.
        value: String,
        kind: &'static str,
    },
}

impl InventoryError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn hex_decode(
        property: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::HexDecode {
            property: property.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(
        property: impl Into<String>,
        value: impl Into<String>,
        kind: &'static str,
    ) -> Self {
        Self::InvalidValue {
            property: property.into(),
            value: value.into(),
            kind,
        }
    }

    /// True for both flavours of decode failure (wire record and hex payload).
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::HexDecode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_failures_count_as_decode_errors() {
        let err = InventoryError::hex_decode("system_name", "0xabc", "odd length");
        assert!(err.is_decode());
        assert_eq!(
            err.to_string(),
            "hex decode failed for `system_name` (0xabc): odd length"
        );
    }

    #[test]
    fn invalid_value_is_not_a_decode_error() {
        let err = InventoryError::invalid_value("tags", "[1,2]", "array");
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "invalid value for `tags`: array [1,2]");
    }
}
