//! Identifier types for the task event domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Durable identity of an out-of-line payload (reason or payload text).
///
/// Several rows may reference the same payload identity when the same
/// logical payload is persisted more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadId(Uuid);

impl PayloadId {
    /// Creates a new random payload identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a payload identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PayloadId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for PayloadId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PayloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
