//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Node
/// identities and stream positions are values: two instances holding the same
/// data describe the same thing.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
