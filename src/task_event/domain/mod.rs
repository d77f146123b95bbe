//! Domain model for task event marshalling.
//!
//! Task messages, the history events they carry, and the canonical row each
//! message projects onto. No infrastructure concerns live here.

mod error;
mod event;
mod ids;
mod message;
mod row;

pub use error::{MalformedEventError, ParseEventTypeError, TaskEventDomainError};
pub use event::{EventKind, EventType, HistoryEvent};
pub use ids::PayloadId;
pub use message::{OrchestrationInstance, TaskMessage};
pub use row::{ColumnType, ColumnValue, TASK_EVENTS_TYPE_NAME, TaskEventColumn, TaskEventRow};
