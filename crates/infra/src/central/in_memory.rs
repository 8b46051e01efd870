use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use invsync_core::{NodeId, NodeIdentifier};
use invsync_events::{InventoryAction, StreamPosition};

use super::r#trait::{
    CentralError, Credentials, ProvideCredentials, ShipActions, SyncPositions, TableSyncPositions,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableKey {
    node: NodeId,
    table_name: String,
}

/// In-memory central inventory speaking the full contract.
///
/// Intended for tests/dev. Every shipped batch is recorded in order and
/// advances the per-node, per-table checkpoint to the last position it carried.
#[derive(Debug, Default)]
pub struct InMemoryCentralInventory {
    batches: RwLock<Vec<Vec<InventoryAction>>>,
    positions: RwLock<HashMap<TableKey, StreamPosition>>,
    credentials: Credentials,
    fail_next: AtomicBool,
}

impl InMemoryCentralInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Make the next `ship_bulk_actions` call fail with a transport error.
    pub fn fail_next_shipment(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Batches received so far, in arrival order.
    pub fn shipped_batches(&self) -> Result<Vec<Vec<InventoryAction>>, CentralError> {
        self.batches
            .read()
            .map(|batches| batches.clone())
            .map_err(|_| CentralError::Transport("lock poisoned".to_string()))
    }

    /// Every shipped action, flattened in arrival order.
    pub fn shipped_actions(&self) -> Result<Vec<InventoryAction>, CentralError> {
        Ok(self.shipped_batches()?.into_iter().flatten().collect())
    }
}

impl ShipActions for InMemoryCentralInventory {
    fn ship_bulk_actions(&self, actions: &[InventoryAction]) -> Result<(), CentralError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CentralError::Transport("simulated delivery failure".to_string()));
        }

        let mut batches = self
            .batches
            .write()
            .map_err(|_| CentralError::Transport("lock poisoned".to_string()))?;
        let mut positions = self
            .positions
            .write()
            .map_err(|_| CentralError::Transport("lock poisoned".to_string()))?;

        // Batch order is stream order, so the last action per table wins.
        for action in actions {
            let key = TableKey {
                node: action.source_node(),
                table_name: action.table_name().to_string(),
            };
            positions.insert(key, action.stream_position().clone());
        }
        batches.push(actions.to_vec());

        Ok(())
    }
}

impl SyncPositions for InMemoryCentralInventory {
    fn load_table_sync_positions(
        &self,
        node: &NodeIdentifier,
    ) -> Result<TableSyncPositions, CentralError> {
        let positions = self
            .positions
            .read()
            .map_err(|_| CentralError::Transport("lock poisoned".to_string()))?;

        Ok(positions
            .iter()
            .filter(|(key, _)| key.node == node.uuid())
            .map(|(key, position)| (key.table_name.clone(), position.clone()))
            .collect())
    }
}

impl ProvideCredentials for InMemoryCentralInventory {
    fn get_credentials(&self) -> Result<Credentials, CentralError> {
        Ok(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invsync_events::ActionKind;

    fn action(node: NodeId, table: &str, position: &str) -> InventoryAction {
        InventoryAction::new(node, table, position, ActionKind::Update, "k", None, vec![])
    }

    #[test]
    fn records_batches_and_tracks_last_position_per_table() {
        let central = InMemoryCentralInventory::new();
        let node = NodeIdentifier::new(NodeId::new(), "edge-01", "edge-01.example.com");
        let other = NodeId::new();

        central
            .ship_bulk_actions(&[
                action(node.uuid(), "snmp_system_info", "10-0"),
                action(node.uuid(), "snmp_interface", "11-0"),
                action(node.uuid(), "snmp_system_info", "12-0"),
                action(other, "snmp_system_info", "99-0"),
            ])
            .unwrap();

        assert_eq!(central.shipped_batches().unwrap().len(), 1);
        let positions = central.load_table_sync_positions(&node).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions["snmp_system_info"].as_str(), "12-0");
        assert_eq!(positions["snmp_interface"].as_str(), "11-0");
    }

    #[test]
    fn unknown_node_has_no_positions() {
        let central = InMemoryCentralInventory::new();
        let node = NodeIdentifier::new(NodeId::new(), "edge-02", "edge-02.example.com");
        assert!(central.load_table_sync_positions(&node).unwrap().is_empty());
    }

    #[test]
    fn simulated_failure_drops_the_batch_once() {
        let central = InMemoryCentralInventory::new();
        let node = NodeId::new();
        central.fail_next_shipment();

        let batch = [action(node, "t", "1-0")];
        assert!(matches!(
            central.ship_bulk_actions(&batch),
            Err(CentralError::Transport(_))
        ));
        assert!(central.shipped_actions().unwrap().is_empty());

        central.ship_bulk_actions(&batch).unwrap();
        assert_eq!(central.shipped_actions().unwrap(), batch);
    }

    #[test]
    fn poisoned_lock_surfaces_as_transport_error() {
        let central = std::sync::Arc::new(InMemoryCentralInventory::new());
        let poisoner = central.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.batches.write().unwrap();
            panic!("poison the batch log");
        })
        .join();

        assert!(matches!(
            central.shipped_batches(),
            Err(CentralError::Transport(_))
        ));
        assert!(central.shipped_actions().is_err());
    }

    #[test]
    fn hands_out_configured_credentials() {
        let mut credentials = Credentials::new();
        credentials.insert("username".into(), "edge".into());
        let central = InMemoryCentralInventory::with_credentials(credentials.clone());
        assert_eq!(central.get_credentials().unwrap(), credentials);
    }
}
