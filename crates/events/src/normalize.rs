//! Captured value → storage value normalization.
//!
//! Rules, in precedence order:
//!
//! 1. null stays null
//! 2. `{"oid": "..."}` becomes the dotted identifier text
//! 3. booleans become `"y"` / `"n"`
//! 4. integers pass through
//! 5. strings:
//!    - on properties whose name contains `uuid` or `checksum`, a 36 character
//!      value is UUID text and becomes its 16 raw bytes
//!    - otherwise a `0x` prefix marks hex, decoded to raw bytes
//!    - anything else passes through
//! 6. every other shape is rejected
//!
//! The UUID rule is gated on both the property name and the length. A 40
//! character checksum (a SHA-1 digest) therefore passes through as text.

use std::collections::BTreeMap;

use invsync_core::{InventoryError, InventoryResult};
use uuid::Uuid;

use crate::value::{CapturedValue, StorageValue};

/// Normalized values keyed by property name.
pub type NormalizedValues = BTreeMap<String, StorageValue>;

const UUID_TEXT_LEN: usize = 36;
const HEX_PREFIX: &str = "0x";

/// Normalize a single captured value belonging to `property`.
pub fn normalize(property: &str, value: &CapturedValue) -> InventoryResult<StorageValue> {
    match value {
        CapturedValue::Null => Ok(StorageValue::Null),
        CapturedValue::ObjectIdentifier { oid, .. } => Ok(StorageValue::Text(oid.clone())),
        CapturedValue::Boolean(flag) => Ok(StorageValue::Text(flag_text(*flag).to_string())),
        CapturedValue::Integer(i) => Ok(StorageValue::Integer(*i)),
        CapturedValue::String(s) => normalize_string(property, s),
        CapturedValue::Unrecognized(raw) => Err(InventoryError::invalid_value(
            property,
            raw.to_string(),
            value.kind(),
        )),
    }
}

/// Normalize every entry of a captured value map.
///
/// Stops at the first failure.
pub fn normalize_all<'a, I>(values: I) -> InventoryResult<NormalizedValues>
where
    I: IntoIterator<Item = (&'a String, &'a CapturedValue)>,
{
    values
        .into_iter()
        .map(|(property, value)| -> InventoryResult<(String, StorageValue)> {
            Ok((property.clone(), normalize(property, value)?))
        })
        .collect()
}

fn flag_text(flag: bool) -> &'static str {
    if flag { "y" } else { "n" }
}

fn carries_binary_uuid(property: &str) -> bool {
    property.contains("uuid") || property.contains("checksum")
}

fn normalize_string(property: &str, s: &str) -> InventoryResult<StorageValue> {
    if carries_binary_uuid(property) && s.len() == UUID_TEXT_LEN {
        let uuid = Uuid::parse_str(s).map_err(|e| {
            InventoryError::decode(format!("`{property}` holds malformed UUID `{s}`: {e}"))
        })?;
        return Ok(StorageValue::Binary(uuid.as_bytes().to_vec()));
    }

    if let Some(digits) = s.strip_prefix(HEX_PREFIX) {
        let bytes = hex::decode(digits).map_err(|e| InventoryError::hex_decode(property, s, e))?;
        return Ok(StorageValue::Binary(bytes));
    }

    Ok(StorageValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn string(s: &str) -> CapturedValue {
        CapturedValue::String(s.to_string())
    }

    #[test]
    fn null_integer_and_oid_pass_through() {
        assert_eq!(normalize("x", &CapturedValue::Null).unwrap(), StorageValue::Null);
        assert_eq!(
            normalize("system_engine_boot_count", &CapturedValue::Integer(53)).unwrap(),
            StorageValue::Integer(53)
        );
        assert_eq!(
            normalize(
                "system_oid",
                &CapturedValue::object_identifier("1.3.6.1.4.1.8072.3.2.10")
            )
            .unwrap(),
            StorageValue::Text("1.3.6.1.4.1.8072.3.2.10".into())
        );
    }

    #[test]
    fn uuid_named_property_decodes_to_raw_bytes() {
        let text = "a2f2606d-4182-443b-99c3-77abe4f006da";
        let normalized = normalize("device_uuid", &string(text)).unwrap();
        let expected = Uuid::parse_str(text).unwrap().as_bytes().to_vec();
        assert_eq!(normalized, StorageValue::Binary(expected));
    }

    #[test]
    fn checksum_named_property_decodes_uuid_text_to_raw_bytes() {
        let text = "4c2f8b84-49a5-83c0-4ed2-ffcac2c2d0e3";
        let normalized = normalize("row_checksum", &string(text)).unwrap();
        let expected = Uuid::parse_str(text).unwrap().as_bytes().to_vec();
        assert_eq!(normalized, StorageValue::Binary(expected));
    }

    #[test]
    fn oid_with_extra_fields_normalizes_to_its_text() {
        let raw = json!({ "oid": "1.3.6.1.2.1.1.2.0", "label": "sysObjectID" });
        assert_eq!(
            normalize("system_oid", &CapturedValue::from_json(&raw)).unwrap(),
            StorageValue::Text("1.3.6.1.2.1.1.2.0".into())
        );
    }

    #[test]
    fn uuid_text_on_unrelated_property_is_left_alone() {
        let text = "a2f2606d-4182-443b-99c3-77abe4f006da";
        assert_eq!(
            normalize("device", &string(text)).unwrap(),
            StorageValue::Text(text.to_string())
        );
    }

    #[test]
    fn forty_char_checksum_passes_through_as_text() {
        let digest = "4c2f8b8449a583c04ed2ffcac2c2d0e30f712150";
        assert_eq!(
            normalize("checksum", &string(digest)).unwrap(),
            StorageValue::Text(digest.to_string())
        );
    }

    #[test]
    fn malformed_36_char_uuid_is_a_decode_error() {
        let bogus = "zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz";
        assert_eq!(bogus.len(), 36);
        let err = normalize("row_checksum", &string(bogus)).unwrap_err();
        assert!(matches!(err, InventoryError::Decode(_)));
    }

    #[test]
    fn hex_prefixed_string_decodes() {
        assert_eq!(
            normalize("system_location", &string("0x53697474696e67")).unwrap(),
            StorageValue::Binary(b"Sitting".to_vec())
        );
        assert_eq!(
            normalize("system_name", &string("0x")).unwrap(),
            StorageValue::Binary(Vec::new())
        );
    }

    #[test]
    fn bad_hex_fails_with_hex_decode_error() {
        for bad in ["0xabc", "0xzz", "0x0g"] {
            match normalize("system_engine_id", &string(bad)).unwrap_err() {
                InventoryError::HexDecode { property, value, .. } => {
                    assert_eq!(property, "system_engine_id");
                    assert_eq!(value, bad);
                }
                other => panic!("expected hex decode error for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unrecognized_shapes_are_invalid_values() {
        let raw = json!(["a", "b"]);
        match normalize("tags", &CapturedValue::from_json(&raw)).unwrap_err() {
            InventoryError::InvalidValue {
                property,
                value,
                kind,
            } => {
                assert_eq!(property, "tags");
                assert_eq!(value, r#"["a","b"]"#);
                assert_eq!(kind, "array");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn normalize_all_stops_at_first_failure() {
        let mut values = BTreeMap::new();
        values.insert("a".to_string(), CapturedValue::Integer(1));
        values.insert("b".to_string(), string("0x1"));
        assert!(normalize_all(&values).unwrap_err().is_decode());

        values.remove("b");
        let normalized = normalize_all(&values).unwrap();
        assert_eq!(normalized.get("a"), Some(&StorageValue::Integer(1)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: UUID text on a uuid-named property re-encodes to itself.
        #[test]
        fn uuid_bytes_round_trip(raw in any::<[u8; 16]>(), prefix in "[a-z_]{0,8}") {
            let text = Uuid::from_bytes(raw).hyphenated().to_string();
            let property = format!("{prefix}uuid");
            let normalized = normalize(&property, &CapturedValue::String(text.clone())).unwrap();
            let StorageValue::Binary(bytes) = normalized else {
                return Err(TestCaseError::fail("expected binary"));
            };
            let back = Uuid::from_slice(&bytes).unwrap().hyphenated().to_string();
            prop_assert_eq!(back, text);
        }

        /// Property: `0x` + even-length hex yields exactly the encoded bytes.
        #[test]
        fn hex_decodes_exact_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let text = format!("0x{}", hex::encode(&bytes));
            let normalized = normalize("system_description", &CapturedValue::String(text)).unwrap();
            prop_assert_eq!(normalized, StorageValue::Binary(bytes));
        }

        /// Property: an odd number of hex digits always fails.
        #[test]
        fn odd_length_hex_fails(digits in "([0-9a-f]{2}){0,16}[0-9a-f]") {
            let text = format!("0x{digits}");
            let err = normalize("system_contact", &CapturedValue::String(text)).unwrap_err();
            prop_assert!(err.is_decode());
        }

        /// Property: booleans normalize to y/n regardless of the property name.
        #[test]
        fn booleans_become_flags(property in ".{0,16}", flag in any::<bool>()) {
            let normalized = normalize(&property, &CapturedValue::Boolean(flag)).unwrap();
            let expected = if flag { "y" } else { "n" };
            prop_assert_eq!(normalized, StorageValue::Text(expected.to_string()));
        }
    }
}
