//! Error types for task event construction and introspection.

use super::EventType;
use thiserror::Error;

/// Errors returned while constructing domain task event values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskEventDomainError {
    /// The orchestration instance identifier is empty after trimming.
    #[error("orchestration instance ID must not be empty")]
    EmptyInstanceId,
}

/// Error returned while parsing event types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct ParseEventTypeError(pub String);

/// Raised when a column value cannot be extracted from an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedEventError {
    /// The event type requires a name but the event carries a blank one.
    #[error("{event_type} event {event_id} has no name")]
    MissingName {
        /// Type of the offending event.
        event_type: EventType,
        /// Sequence identifier of the offending event.
        event_id: i32,
    },

    /// The task identifier resolved for the event is negative.
    #[error("{event_type} event resolved to negative task ID {task_id}")]
    NegativeTaskId {
        /// Type of the offending event.
        event_type: EventType,
        /// The rejected task identifier.
        task_id: i32,
    },
}
