//! Orchestration history events carried by task messages.

use super::ParseEventTypeError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag identifying the kind of an orchestration event.
///
/// The string form is what the `EventType` column stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// An orchestration execution was started.
    ExecutionStarted,
    /// An orchestration execution finished, successfully or not.
    ExecutionCompleted,
    /// An orchestration execution was terminated externally.
    ExecutionTerminated,
    /// An orchestration execution was suspended.
    ExecutionSuspended,
    /// A suspended orchestration execution was resumed.
    ExecutionResumed,
    /// An activity call was scheduled.
    TaskScheduled,
    /// An activity call completed.
    TaskCompleted,
    /// An activity call failed.
    TaskFailed,
    /// A sub-orchestration was started.
    SubOrchestrationInstanceCreated,
    /// A sub-orchestration completed.
    SubOrchestrationInstanceCompleted,
    /// A sub-orchestration failed.
    SubOrchestrationInstanceFailed,
    /// A durable timer was created.
    TimerCreated,
    /// A durable timer fired.
    TimerFired,
    /// An external event was raised against the orchestration.
    EventRaised,
    /// The orchestration sent an event to another instance.
    EventSent,
    /// Free-form event with opaque data.
    GenericEvent,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::ExecutionStarted,
        Self::ExecutionCompleted,
        Self::ExecutionTerminated,
        Self::ExecutionSuspended,
        Self::ExecutionResumed,
        Self::TaskScheduled,
        Self::TaskCompleted,
        Self::TaskFailed,
        Self::SubOrchestrationInstanceCreated,
        Self::SubOrchestrationInstanceCompleted,
        Self::SubOrchestrationInstanceFailed,
        Self::TimerCreated,
        Self::TimerFired,
        Self::EventRaised,
        Self::EventSent,
        Self::GenericEvent,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExecutionStarted => "ExecutionStarted",
            Self::ExecutionCompleted => "ExecutionCompleted",
            Self::ExecutionTerminated => "ExecutionTerminated",
            Self::ExecutionSuspended => "ExecutionSuspended",
            Self::ExecutionResumed => "ExecutionResumed",
            Self::TaskScheduled => "TaskScheduled",
            Self::TaskCompleted => "TaskCompleted",
            Self::TaskFailed => "TaskFailed",
            Self::SubOrchestrationInstanceCreated => "SubOrchestrationInstanceCreated",
            Self::SubOrchestrationInstanceCompleted => "SubOrchestrationInstanceCompleted",
            Self::SubOrchestrationInstanceFailed => "SubOrchestrationInstanceFailed",
            Self::TimerCreated => "TimerCreated",
            Self::TimerFired => "TimerFired",
            Self::EventRaised => "EventRaised",
            Self::EventSent => "EventSent",
            Self::GenericEvent => "GenericEvent",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParseEventTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == value)
            .ok_or_else(|| ParseEventTypeError(value.to_owned()))
    }
}

impl TryFrom<&str> for EventType {
    type Error = ParseEventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Per-type event data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum EventKind {
    /// An orchestration execution was started.
    ExecutionStarted {
        /// Orchestration name.
        name: String,
        /// Orchestration version.
        version: Option<String>,
        /// Serialized orchestration input.
        input: Option<String>,
        /// Delayed start time, if any.
        scheduled_start_time: Option<DateTime<Utc>>,
    },
    /// An orchestration execution finished.
    ExecutionCompleted {
        /// Serialized orchestration output.
        result: Option<String>,
        /// Failure reason when the execution failed.
        failure_reason: Option<String>,
    },
    /// An orchestration execution was terminated externally.
    ExecutionTerminated {
        /// Serialized termination input.
        input: Option<String>,
    },
    /// An orchestration execution was suspended.
    ExecutionSuspended {
        /// Why the execution was suspended.
        reason: Option<String>,
    },
    /// A suspended orchestration execution was resumed.
    ExecutionResumed {
        /// Why the execution was resumed.
        reason: Option<String>,
    },
    /// An activity call was scheduled.
    TaskScheduled {
        /// Activity name.
        name: String,
        /// Activity version.
        version: Option<String>,
        /// Serialized activity input.
        input: Option<String>,
    },
    /// An activity call completed.
    TaskCompleted {
        /// Event ID of the originating `TaskScheduled` event.
        task_scheduled_id: i32,
        /// Serialized activity output.
        result: Option<String>,
    },
    /// An activity call failed.
    TaskFailed {
        /// Event ID of the originating `TaskScheduled` event.
        task_scheduled_id: i32,
        /// Failure reason.
        reason: Option<String>,
        /// Failure details.
        details: Option<String>,
    },
    /// A sub-orchestration was started.
    SubOrchestrationInstanceCreated {
        /// Sub-orchestration name.
        name: String,
        /// Sub-orchestration version.
        version: Option<String>,
        /// Instance ID of the sub-orchestration.
        instance_id: String,
        /// Serialized sub-orchestration input.
        input: Option<String>,
    },
    /// A sub-orchestration completed.
    SubOrchestrationInstanceCompleted {
        /// Event ID of the originating creation event.
        task_scheduled_id: i32,
        /// Serialized sub-orchestration output.
        result: Option<String>,
    },
    /// A sub-orchestration failed.
    SubOrchestrationInstanceFailed {
        /// Event ID of the originating creation event.
        task_scheduled_id: i32,
        /// Failure reason.
        reason: Option<String>,
        /// Failure details.
        details: Option<String>,
    },
    /// A durable timer was created.
    TimerCreated {
        /// When the timer is due.
        fire_at: DateTime<Utc>,
    },
    /// A durable timer fired.
    TimerFired {
        /// Event ID of the originating `TimerCreated` event.
        timer_id: i32,
        /// When the timer was due.
        fire_at: DateTime<Utc>,
    },
    /// An external event was raised against the orchestration.
    EventRaised {
        /// External event name.
        name: String,
        /// Serialized event data.
        input: Option<String>,
    },
    /// The orchestration sent an event to another instance.
    EventSent {
        /// Event name.
        name: String,
        /// Target instance ID.
        instance_id: String,
        /// Serialized event data.
        input: Option<String>,
    },
    /// Free-form event with opaque data.
    GenericEvent {
        /// Opaque event data.
        data: Option<String>,
    },
}

impl EventKind {
    /// Returns the tag for this kind.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::ExecutionStarted { .. } => EventType::ExecutionStarted,
            Self::ExecutionCompleted { .. } => EventType::ExecutionCompleted,
            Self::ExecutionTerminated { .. } => EventType::ExecutionTerminated,
            Self::ExecutionSuspended { .. } => EventType::ExecutionSuspended,
            Self::ExecutionResumed { .. } => EventType::ExecutionResumed,
            Self::TaskScheduled { .. } => EventType::TaskScheduled,
            Self::TaskCompleted { .. } => EventType::TaskCompleted,
            Self::TaskFailed { .. } => EventType::TaskFailed,
            Self::SubOrchestrationInstanceCreated { .. } => {
                EventType::SubOrchestrationInstanceCreated
            }
            Self::SubOrchestrationInstanceCompleted { .. } => {
                EventType::SubOrchestrationInstanceCompleted
            }
            Self::SubOrchestrationInstanceFailed { .. } => {
                EventType::SubOrchestrationInstanceFailed
            }
            Self::TimerCreated { .. } => EventType::TimerCreated,
            Self::TimerFired { .. } => EventType::TimerFired,
            Self::EventRaised { .. } => EventType::EventRaised,
            Self::EventSent { .. } => EventType::EventSent,
            Self::GenericEvent { .. } => EventType::GenericEvent,
        }
    }
}

/// An orchestration history event.
///
/// # Examples
///
/// ```
/// use durastore::task_event::domain::{EventKind, EventType, HistoryEvent};
/// use mockable::DefaultClock;
///
/// let event = HistoryEvent::new(
///     3,
///     EventKind::TaskScheduled {
///         name: "SayHello".to_owned(),
///         version: None,
///         input: Some("\"Tokyo\"".to_owned()),
///     },
///     &DefaultClock,
/// );
/// assert_eq!(event.event_type(), EventType::TaskScheduled);
/// assert_eq!(event.event_id(), 3);
/// ```
///
/// Equality and hashing cover every field, so two events are the same event
/// only when their type, sequence identifier, timestamp, and per-type data
/// all match. Outbound events commonly share the unassigned sequence
/// identifier `-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEvent {
    event_id: i32,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    kind: EventKind,
}

impl HistoryEvent {
    /// Creates an event stamped with the clock's current time.
    #[must_use]
    pub fn new(event_id: i32, kind: EventKind, clock: &impl Clock) -> Self {
        Self {
            event_id,
            timestamp: clock.utc(),
            kind,
        }
    }

    /// Reconstructs an event from persisted parts.
    #[must_use]
    pub const fn from_persisted(event_id: i32, timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            event_id,
            timestamp,
            kind,
        }
    }

    /// Returns the event's sequence identifier within its history.
    #[must_use]
    pub const fn event_id(&self) -> i32 {
        self.event_id
    }

    /// Returns when the event was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the per-type event data.
    #[must_use]
    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Returns the event's type tag.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}
