//! Central inventory boundary.
//!
//! The central authority receives shipped actions and, depending on the
//! contract revision it speaks, reports replay checkpoints and credentials.
//! Each revision is a supertrait extension of the previous one.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCentralInventory;
pub use r#trait::{
    CentralError, CentralInventory, Credentials, ProvideCredentials, ShipActions, SyncPositions,
    TableSyncPositions,
};
