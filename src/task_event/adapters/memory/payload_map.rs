//! In-memory payload identity map.

use crate::task_event::{
    domain::{HistoryEvent, PayloadId, TaskEventRow},
    ports::PayloadIdentityLookup,
};
use std::collections::HashMap;

/// Per-batch map from an exact event to the payload identity it was given.
///
/// Events are matched on their full content, not on the sequence identifier
/// alone, so unrelated events that share a type, identifier, and timestamp
/// never share an identity. The caller owns the map, populates it as rows
/// are persisted, and drops it when the batch completes. Projection only
/// reads from it.
///
/// # Examples
///
/// ```
/// use durastore::task_event::adapters::memory::EventPayloadMap;
/// use durastore::task_event::domain::{EventKind, HistoryEvent, PayloadId};
/// use durastore::task_event::ports::PayloadIdentityLookup;
/// use mockable::DefaultClock;
///
/// let event = HistoryEvent::new(
///     1,
///     EventKind::GenericEvent { data: Some("blob".to_owned()) },
///     &DefaultClock,
/// );
/// let payload_id = PayloadId::new();
///
/// let mut payloads = EventPayloadMap::new();
/// payloads.insert(&event, payload_id);
/// assert_eq!(payloads.payload_id(&event), Some(payload_id));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventPayloadMap {
    ids: HashMap<HistoryEvent, PayloadId>,
}

impl EventPayloadMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the payload identity assigned to an event.
    ///
    /// Returns the identity previously recorded for the event, if any.
    pub fn insert(&mut self, event: &HistoryEvent, payload_id: PayloadId) -> Option<PayloadId> {
        self.ids.insert(event.clone(), payload_id)
    }

    /// Records the payload identity carried by a persisted row.
    ///
    /// Rows without a payload identity leave the map unchanged.
    pub fn record_row(&mut self, event: &HistoryEvent, row: &TaskEventRow) {
        if let Some(payload_id) = row.payload_id {
            self.ids.insert(event.clone(), payload_id);
        }
    }

    /// Returns the number of recorded identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether no identity has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl PayloadIdentityLookup for EventPayloadMap {
    fn payload_id(&self, event: &HistoryEvent) -> Option<PayloadId> {
        self.ids.get(event).copied()
    }
}
