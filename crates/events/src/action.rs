//! Captured change ("inventory action") and its memoized storage view.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use invsync_core::{InventoryResult, NodeId};

use crate::action_kind::ActionKind;
use crate::normalize::{NormalizedValues, normalize_all};
use crate::position::StreamPosition;
use crate::value::{CapturedValue, StorageValue};

/// Raw captured values keyed by property name.
pub type CapturedValues = BTreeMap<String, CapturedValue>;

/// Row-identifying lookup tuple, in key-property order.
pub type KeyValues = Vec<(String, StorageValue)>;

/// One change captured on a monitored node.
///
/// Immutable once built. The raw `values` are never rewritten: normalized
/// values are derived lazily on first access and cached beside them, so the
/// action can always be re-encoded in its wire-faithful form.
#[derive(Debug, Clone)]
pub struct InventoryAction {
    source_node: NodeId,
    table_name: String,
    stream_position: StreamPosition,
    action: ActionKind,
    key: String,
    checksum: Option<String>,

    /// Composite key columns, in column order.
    key_properties: Vec<String>,

    /// Absent for payload-less actions (deletes).
    values: Option<CapturedValues>,

    normalized: OnceLock<NormalizedValues>,
}

impl InventoryAction {
    pub fn new(
        source_node: NodeId,
        table_name: impl Into<String>,
        stream_position: impl Into<StreamPosition>,
        action: ActionKind,
        key: impl Into<String>,
        checksum: Option<String>,
        key_properties: Vec<String>,
    ) -> Self {
        Self {
            source_node,
            table_name: table_name.into(),
            stream_position: stream_position.into(),
            action,
            key: key.into(),
            checksum,
            key_properties,
            values: None,
            normalized: OnceLock::new(),
        }
    }

    /// Attach the captured value payload.
    pub fn with_values(self, values: CapturedValues) -> Self {
        Self {
            values: Some(values),
            normalized: OnceLock::new(),
            ..self
        }
    }

    pub fn source_node(&self) -> NodeId {
        self.source_node
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn stream_position(&self) -> &StreamPosition {
        &self.stream_position
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn key_properties(&self) -> &[String] {
        &self.key_properties
    }

    pub fn values(&self) -> Option<&CapturedValues> {
        self.values.as_ref()
    }

    /// Every captured value, normalized for storage.
    ///
    /// Computed on first call and cached for the lifetime of the action. A
    /// failure is not cached: calling again repeats the same failure.
    pub fn all_normalized_values(&self) -> InventoryResult<&NormalizedValues> {
        if let Some(cached) = self.normalized.get() {
            return Ok(cached);
        }

        let computed = match &self.values {
            Some(values) => normalize_all(values).inspect_err(|e| {
                tracing::warn!(
                    table = %self.table_name,
                    key = %self.key,
                    position = %self.stream_position,
                    error = %e,
                    "failed to normalize captured values"
                );
            })?,
            None => NormalizedValues::new(),
        };

        // Concurrent callers may race here; they all computed the same value.
        Ok(self.normalized.get_or_init(|| computed))
    }

    /// Normalized values minus the key columns: the SET part of a row update.
    pub fn values_for_update(&self) -> InventoryResult<NormalizedValues> {
        let mut values = self.all_normalized_values()?.clone();
        for property in &self.key_properties {
            values.remove(property);
        }
        Ok(values)
    }

    /// Normalized key column values in key-property order; `Null` for any key
    /// property the payload does not carry.
    pub fn key_property_values(&self) -> InventoryResult<KeyValues> {
        let all = self.all_normalized_values()?;
        let mut tuple: KeyValues = Vec::with_capacity(self.key_properties.len());
        for property in &self.key_properties {
            if tuple.iter().any(|(name, _)| name == property) {
                continue;
            }
            let value = all.get(property).cloned().unwrap_or(StorageValue::Null);
            tuple.push((property.clone(), value));
        }
        Ok(tuple)
    }
}

impl PartialEq for InventoryAction {
    fn eq(&self, other: &Self) -> bool {
        self.source_node == other.source_node
            && self.table_name == other.table_name
            && self.stream_position == other.stream_position
            && self.action == other.action
            && self.key == other.key
            && self.checksum == other.checksum
            && self.key_properties == other.key_properties
            && self.values == other.values
    }
}
