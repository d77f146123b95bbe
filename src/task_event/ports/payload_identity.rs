//! Read-only capability for reusing previously assigned payload identities.

use crate::task_event::domain::{HistoryEvent, PayloadId};

/// Point lookups from an event to the payload identity it was given earlier.
///
/// Implementations are owned and populated by the caller, per persistence
/// batch. Projection only reads from them and never registers new
/// identities.
#[cfg_attr(test, mockall::automock)]
pub trait PayloadIdentityLookup: Send + Sync {
    /// Returns the identity previously recorded for this exact event.
    fn payload_id(&self, event: &HistoryEvent) -> Option<PayloadId>;
}
