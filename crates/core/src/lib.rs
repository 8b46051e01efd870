//! `invsync-core` — identity and error primitives for node inventory sync.
//!
//! This crate contains **pure domain** primitives (no IO, no transport).

pub mod error;
pub mod id;
pub mod node;
pub mod value_object;

pub use error::{InventoryError, InventoryResult};
pub use id::NodeId;
pub use node::{NodeIdentifier, json_type_name};
pub use value_object::ValueObject;
