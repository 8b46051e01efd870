//! Ordered bulk shipping to the central inventory.

use thiserror::Error;

use serde_json::Value as JsonValue;

use invsync_events::{InventoryAction, codec};

use crate::central::{CentralError, ShipActions};
use crate::config::ShipperConfig;

/// Shipping stopped partway; everything before `delivered` reached the central
/// inventory, nothing after it was attempted.
#[derive(Debug, Error)]
#[error("bulk shipping stopped after {delivered} of {total} actions: {source}")]
pub struct ShipFailure {
    pub delivered: usize,
    pub total: usize,
    #[source]
    pub source: CentralError,
}

/// Splits an ordered run of actions into batches and ships them one by one.
///
/// Batches go out in input order and the first failure stops the run, so the
/// central inventory never sees a later position before an earlier one.
pub struct BulkShipper<C> {
    central: C,
    config: ShipperConfig,
}

impl<C> BulkShipper<C>
where
    C: ShipActions,
{
    pub fn new(central: C, config: ShipperConfig) -> Self {
        Self { central, config }
    }

    pub fn central(&self) -> &C {
        &self.central
    }

    pub fn config(&self) -> ShipperConfig {
        self.config
    }

    /// Ship `actions` in order. Returns the number of batches sent.
    pub fn ship(&self, actions: &[InventoryAction]) -> Result<usize, ShipFailure> {
        let batch_size = self.config.batch_size.max(1);
        let mut delivered = 0;
        let mut batches = 0;

        for batch in actions.chunks(batch_size) {
            if let Err(source) = self.central.ship_bulk_actions(batch) {
                tracing::error!(
                    delivered,
                    total = actions.len(),
                    error = %source,
                    "bulk shipping failed"
                );
                return Err(ShipFailure {
                    delivered,
                    total: actions.len(),
                    source,
                });
            }

            delivered += batch.len();
            batches += 1;
            tracing::info!(
                batch = batches,
                size = batch.len(),
                delivered,
                "shipped inventory actions"
            );
        }

        Ok(batches)
    }

    /// Decode wire records and ship them in order.
    ///
    /// Every record is decoded before the first batch goes out, so a bad record
    /// ships nothing.
    pub fn ship_records(&self, records: &[JsonValue]) -> Result<usize, ShipFailure> {
        let actions = records
            .iter()
            .map(codec::decode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!(total = records.len(), error = %e, "cannot decode capture records");
                ShipFailure {
                    delivered: 0,
                    total: records.len(),
                    source: CentralError::from(e),
                }
            })?;

        self.ship(&actions)
    }
}
