//! Column extraction from orchestration events.

use crate::task_event::domain::{EventType, HistoryEvent, MalformedEventError};
use chrono::{DateTime, Utc};

/// Event-derived column values of a task event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColumns {
    /// Activity, orchestration, or event name.
    pub name: Option<String>,
    /// Event type tag.
    pub event_type: EventType,
    /// Task identifier.
    pub task_id: Option<i32>,
    /// Delayed delivery time.
    pub visible_time: Option<DateTime<Utc>>,
    /// Reason text.
    pub reason: Option<String>,
    /// Payload text.
    pub payload_text: Option<String>,
    /// Schema or version tag.
    pub version: Option<String>,
}

impl EventColumns {
    /// Creates columns holding only the event type.
    #[must_use]
    pub const fn new(event_type: EventType) -> Self {
        Self {
            name: None,
            event_type,
            task_id: None,
            visible_time: None,
            reason: None,
            payload_text: None,
            version: None,
        }
    }

    /// Returns whether there is reason or payload text to store.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.reason.is_some() || self.payload_text.is_some()
    }
}

/// Extracts row columns from a history event.
#[cfg_attr(test, mockall::automock)]
pub trait EventIntrospector: Send + Sync {
    /// Returns the event-derived columns.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEventError`] when a required value cannot be
    /// extracted from the event.
    fn columns(&self, event: &HistoryEvent) -> Result<EventColumns, MalformedEventError>;
}
