//! Captured inventory changes: value model, normalization and wire codec.
//!
//! Pure and synchronous. The only state is each action's normalized-value
//! cache.

pub mod action;
pub mod action_kind;
pub mod codec;
pub mod normalize;
pub mod position;
pub mod value;

pub use action::{CapturedValues, InventoryAction, KeyValues};
pub use action_kind::ActionKind;
pub use normalize::{NormalizedValues, normalize, normalize_all};
pub use position::StreamPosition;
pub use value::{CapturedValue, StorageValue};
