//! Resume filtering against central checkpoints.
//!
//! After a restart the capture source may replay actions the central inventory
//! already applied. The filter drops those, keeping input order for the rest.

use invsync_core::NodeIdentifier;
use invsync_events::InventoryAction;

use crate::central::{CentralError, SyncPositions, TableSyncPositions};

#[derive(Debug, Clone, Default)]
pub struct ResumeFilter {
    positions: TableSyncPositions,
}

impl ResumeFilter {
    pub fn new(positions: TableSyncPositions) -> Self {
        Self { positions }
    }

    /// Load the checkpoints the central inventory holds for `node`.
    pub fn load<C>(central: &C, node: &NodeIdentifier) -> Result<Self, CentralError>
    where
        C: SyncPositions + ?Sized,
    {
        let positions = central.load_table_sync_positions(node)?;
        tracing::debug!(node = %node, tables = positions.len(), "loaded table sync positions");
        Ok(Self::new(positions))
    }

    pub fn positions(&self) -> &TableSyncPositions {
        &self.positions
    }

    /// Whether `action` still has to be shipped.
    ///
    /// Tables without a checkpoint always pass. Positions that cannot be
    /// compared pass too: shipping twice is recoverable, a gap is not.
    pub fn is_pending(&self, action: &InventoryAction) -> bool {
        let Some(checkpoint) = self.positions.get(action.table_name()) else {
            return true;
        };

        match action.stream_position().is_after(checkpoint) {
            Some(pending) => pending,
            None => {
                tracing::warn!(
                    table = action.table_name(),
                    position = %action.stream_position(),
                    checkpoint = %checkpoint,
                    "cannot compare stream positions, keeping action"
                );
                true
            }
        }
    }

    /// Drop actions at or before their table's checkpoint.
    pub fn filter(&self, actions: Vec<InventoryAction>) -> Vec<InventoryAction> {
        let total = actions.len();
        let pending: Vec<_> = actions.into_iter().filter(|a| self.is_pending(a)).collect();
        if pending.len() < total {
            tracing::debug!(
                skipped = total - pending.len(),
                kept = pending.len(),
                "skipped already applied actions"
            );
        }
        pending
    }
}
