use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use invsync_core::{InventoryError, NodeIdentifier};
use invsync_events::{InventoryAction, StreamPosition};

/// Last applied stream position per table, for one node.
pub type TableSyncPositions = BTreeMap<String, StreamPosition>;

/// Connection credentials for the shipping transport.
pub type Credentials = BTreeMap<String, String>;

/// Central inventory operation error.
///
/// These are **boundary errors** (transport, configuration, capability) as
/// opposed to the decode/normalization errors raised by the domain layer.
#[derive(Debug, Error)]
pub enum CentralError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Narrowest central inventory contract: accepts batches of actions.
///
/// The batch order must be kept by the transport: stream positions within a
/// table are only meaningful in order. Failures are surfaced, never retried
/// here; timeout and retry policy belong to the caller.
pub trait ShipActions: Send + Sync {
    fn ship_bulk_actions(&self, actions: &[InventoryAction]) -> Result<(), CentralError>;
}

/// Contract revision that also reports replay checkpoints.
pub trait SyncPositions: ShipActions {
    /// Last successfully applied position per table for `node`, used to resume
    /// capture without reprocessing or gaps. Tables never synced are absent.
    fn load_table_sync_positions(
        &self,
        node: &NodeIdentifier,
    ) -> Result<TableSyncPositions, CentralError>;
}

/// Contract revision that also hands out transport credentials.
pub trait ProvideCredentials: ShipActions {
    fn get_credentials(&self) -> Result<Credentials, CentralError>;
}

/// Full central inventory contract: ship, checkpoint-resume and credentials.
pub trait CentralInventory: SyncPositions + ProvideCredentials {}

impl<C> CentralInventory for C where C: SyncPositions + ProvideCredentials + ?Sized {}

impl<C> ShipActions for Arc<C>
where
    C: ShipActions + ?Sized,
{
    fn ship_bulk_actions(&self, actions: &[InventoryAction]) -> Result<(), CentralError> {
        (**self).ship_bulk_actions(actions)
    }
}

impl<C> SyncPositions for Arc<C>
where
    C: SyncPositions + ?Sized,
{
    fn load_table_sync_positions(
        &self,
        node: &NodeIdentifier,
    ) -> Result<TableSyncPositions, CentralError> {
        (**self).load_table_sync_positions(node)
    }
}

impl<C> ProvideCredentials for Arc<C>
where
    C: ProvideCredentials + ?Sized,
{
    fn get_credentials(&self) -> Result<Credentials, CentralError> {
        (**self).get_credentials()
    }
}
