//! Infrastructure layer: central inventory boundary, shipping, resume, config.

pub mod central;
pub mod config;
pub mod resume;
pub mod shipper;


pub use central::{
    CentralError, CentralInventory, Credentials, InMemoryCentralInventory, ProvideCredentials,
    ShipActions, SyncPositions, TableSyncPositions,
};
pub use config::ShipperConfig;
pub use resume::ResumeFilter;
pub use shipper::{BulkShipper, ShipFailure};
