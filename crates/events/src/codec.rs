//! Wire codec for inventory actions.
//!
//! Wire form:
//!
//! ```text
//! {
//!   "sourceNode":     "<uuid text>",
//!   "tableName":      "<string>",
//!   "streamPosition": "<millis>-<seq>",
//!   "action":         "create" | "update" | "delete",
//!   "key":            "<string>",
//!   "checksum":       "<string>" | null,
//!   "keyProperties":  ["<string>", ...],
//!   "values":         { "<property>": <captured value>, ... } | null
//! }
//! ```
//!
//! Values always travel raw; the codec never normalizes.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue, json};

use invsync_core::{InventoryError, InventoryResult, NodeId, json_type_name};

use crate::action::{CapturedValues, InventoryAction};
use crate::action_kind::ActionKind;
use crate::value::CapturedValue;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireAction {
    source_node: String,
    table_name: String,
    stream_position: String,
    action: String,
    key: String,
    checksum: Option<String>,
    key_properties: Vec<String>,
    #[serde(default)]
    values: Option<Map<String, JsonValue>>,
}

/// Decode a parsed wire record.
pub fn decode(record: &JsonValue) -> InventoryResult<InventoryAction> {
    if !record.is_object() {
        return Err(InventoryError::decode(format!(
            "cannot decode InventoryAction from {}",
            json_type_name(record)
        )));
    }

    let wire: WireAction = serde_json::from_value(record.clone()).map_err(|e| {
        tracing::debug!(error = %e, "rejected inventory action record");
        InventoryError::decode(format!("InventoryAction: {e}"))
    })?;

    let source_node: NodeId = wire.source_node.parse()?;
    let action: ActionKind = wire.action.parse()?;

    let decoded = InventoryAction::new(
        source_node,
        wire.table_name,
        wire.stream_position,
        action,
        wire.key,
        wire.checksum,
        wire.key_properties,
    );

    Ok(match wire.values {
        Some(values) => decoded.with_values(
            values
                .iter()
                .map(|(property, value)| (property.clone(), CapturedValue::from_json(value)))
                .collect::<CapturedValues>(),
        ),
        None => decoded,
    })
}

/// Parse and decode a JSON text record.
pub fn decode_str(text: &str) -> InventoryResult<InventoryAction> {
    let record: JsonValue = serde_json::from_str(text)
        .map_err(|e| InventoryError::decode(format!("invalid JSON: {e}")))?;
    decode(&record)
}

/// Encode an action to its canonical wire record, values exactly as captured.
pub fn encode(action: &InventoryAction) -> JsonValue {
    let values = action.values().map(|values| {
        values
            .iter()
            .map(|(property, value)| (property.clone(), value.to_json()))
            .collect::<Map<String, JsonValue>>()
    });

    json!({
        "sourceNode": action.source_node().to_string(),
        "tableName": action.table_name(),
        "streamPosition": action.stream_position().as_str(),
        "action": action.action().as_str(),
        "key": action.key(),
        "checksum": action.checksum(),
        "keyProperties": action.key_properties(),
        "values": values,
    })
}

/// Encode an action to compact JSON text.
pub fn encode_string(action: &InventoryAction) -> String {
    encode(action).to_string()
}
