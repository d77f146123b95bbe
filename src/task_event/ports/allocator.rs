//! Allocation policy for fresh payload identities.

use crate::task_event::domain::{PayloadId, TaskMessage};

/// Mints a payload identity for a message whose payload has none yet.
///
/// Identities must never collide across unrelated payloads. Deterministic
/// implementations must also return the same identity for repeated
/// identical events.
#[cfg_attr(test, mockall::automock)]
pub trait PayloadIdAllocator: Send + Sync {
    /// Allocates an identity for the message's payload.
    fn allocate(&self, message: &TaskMessage) -> PayloadId;
}
