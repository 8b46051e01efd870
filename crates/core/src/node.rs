//! Identity of a monitored node.

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use crate::error::{InventoryError, InventoryResult};
use crate::id::NodeId;
use crate::value_object::ValueObject;

/// Names the origin of captured changes.
///
/// Wire form: `{"uuid": "<uuid text>", "name": "<string>", "fqdn": "<string>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeIdentifier {
    uuid: NodeId,
    name: String,
    fqdn: String,
}

impl ValueObject for NodeIdentifier {}

impl NodeIdentifier {
    pub fn new(uuid: NodeId, name: impl Into<String>, fqdn: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            fqdn: fqdn.into(),
        }
    }

    pub fn uuid(&self) -> NodeId {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// Decode the wire record. Anything but a JSON object is rejected up front.
    pub fn from_json(record: &JsonValue) -> InventoryResult<Self> {
        if !record.is_object() {
            return Err(InventoryError::decode(format!(
                "cannot decode NodeIdentifier from {}",
                json_type_name(record)
            )));
        }

        serde_json::from_value(record.clone())
            .map_err(|e| InventoryError::decode(format!("NodeIdentifier: {e}")))
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "uuid": self.uuid.to_string(),
            "name": self.name,
            "fqdn": self.fqdn,
        })
    }
}

impl core::fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.fqdn, self.uuid)
    }
}

/// Human-readable name of a JSON value's type, for diagnostics.
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
