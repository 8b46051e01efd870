//! Position token within a table's change stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invsync_core::ValueObject;

/// Opaque position within a source table's change stream, e.g. `"1694703295979-0"`.
///
/// Ordering and uniqueness are guaranteed by the upstream stream; this type does
/// not implement `Ord`. The accessors below parse the conventional
/// `<millis>-<sequence>` form on demand and return `None` for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamPosition(String);

impl ValueObject for StreamPosition {}

impl StreamPosition {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parts(&self) -> Option<(u64, u64)> {
        let (millis, seq) = self.0.split_once('-')?;
        Some((millis.parse().ok()?, seq.parse().ok()?))
    }

    /// Millisecond timestamp component.
    pub fn millis(&self) -> Option<u64> {
        self.parts().map(|(millis, _)| millis)
    }

    /// Sequence number within the millisecond.
    pub fn sequence(&self) -> Option<u64> {
        self.parts().map(|(_, seq)| seq)
    }

    /// Capture time encoded in the token.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.millis()?).ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    /// Whether `self` comes strictly after `other`.
    ///
    /// `None` when either token is not in `<millis>-<sequence>` form.
    pub fn is_after(&self, other: &StreamPosition) -> Option<bool> {
        Some(self.parts()? > other.parts()?)
    }
}

impl core::fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamPosition {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StreamPosition {
    fn from(value: String) -> Self {
        Self(value)
    }
}
