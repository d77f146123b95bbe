//! Canonical relational projection of a task message.
//!
//! The column order below is a wire-level contract with the database
//! schema and must only change together with it.

use super::PayloadId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the structured table type that receives task event rows.
pub const TASK_EVENTS_TYPE_NAME: &str = "dt.TaskEvents";

/// Logical type of a task event column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Variable-length character data.
    Text,
    /// 32-bit signed integer.
    Int32,
    /// Timestamp in UTC.
    Timestamp,
    /// 128-bit unique identifier.
    Uuid,
}

/// Columns of a task event row, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEventColumn {
    /// Owning orchestration instance.
    InstanceId,
    /// Owning execution.
    ExecutionId,
    /// Activity, orchestration, or event name.
    Name,
    /// Event type tag.
    EventType,
    /// Task identifier.
    TaskId,
    /// Delayed delivery time.
    VisibleTime,
    /// Lock owner, set only by the work dispatcher.
    LockedBy,
    /// Lock expiry, set only by the work dispatcher.
    LockExpiration,
    /// Reason text.
    Reason,
    /// Payload text.
    PayloadText,
    /// Payload identity.
    PayloadId,
    /// Schema or version tag.
    Version,
}

impl TaskEventColumn {
    /// All columns, in wire order.
    pub const ALL: [Self; 12] = [
        Self::InstanceId,
        Self::ExecutionId,
        Self::Name,
        Self::EventType,
        Self::TaskId,
        Self::VisibleTime,
        Self::LockedBy,
        Self::LockExpiration,
        Self::Reason,
        Self::PayloadText,
        Self::PayloadId,
        Self::Version,
    ];

    /// Returns the column name as declared by the table type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InstanceId => "InstanceID",
            Self::ExecutionId => "ExecutionID",
            Self::Name => "Name",
            Self::EventType => "EventType",
            Self::TaskId => "TaskID",
            Self::VisibleTime => "VisibleTime",
            Self::LockedBy => "LockedBy",
            Self::LockExpiration => "LockExpiration",
            Self::Reason => "Reason",
            Self::PayloadText => "PayloadText",
            Self::PayloadId => "PayloadID",
            Self::Version => "Version",
        }
    }

    /// Returns the column's zero-based ordinal.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns the column's logical type.
    #[must_use]
    pub const fn column_type(self) -> ColumnType {
        match self {
            Self::InstanceId
            | Self::ExecutionId
            | Self::Name
            | Self::EventType
            | Self::LockedBy
            | Self::Reason
            | Self::PayloadText
            | Self::Version => ColumnType::Text,
            Self::TaskId => ColumnType::Int32,
            Self::VisibleTime | Self::LockExpiration => ColumnType::Timestamp,
            Self::PayloadId => ColumnType::Uuid,
        }
    }

    /// Returns the declared maximum length, or `None` when unbounded or not
    /// a text column.
    ///
    /// Bounds are informational; the transport enforces them.
    #[must_use]
    pub const fn max_length(self) -> Option<usize> {
        match self {
            Self::InstanceId | Self::LockedBy | Self::Version => Some(100),
            Self::ExecutionId => Some(50),
            Self::Name => Some(300),
            Self::EventType => Some(40),
            _ => None,
        }
    }

    /// Returns whether the column accepts null values.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        !matches!(self, Self::InstanceId | Self::EventType)
    }
}

/// A typed, borrowed column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue<'a> {
    /// Text value.
    Text(Option<&'a str>),
    /// Integer value.
    Int32(Option<i32>),
    /// Timestamp value.
    Timestamp(Option<DateTime<Utc>>),
    /// Unique identifier value.
    Uuid(Option<uuid::Uuid>),
}

impl ColumnValue<'_> {
    /// Returns whether the value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        match self {
            Self::Text(value) => value.is_none(),
            Self::Int32(value) => value.is_none(),
            Self::Timestamp(value) => value.is_none(),
            Self::Uuid(value) => value.is_none(),
        }
    }
}

/// One task message projected onto the task events table.
///
/// Field lengths are not validated here; the transport rejects values that
/// exceed [`TaskEventColumn::max_length`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEventRow {
    /// Owning orchestration instance.
    pub instance_id: String,
    /// Owning execution, absent for instance-level messages.
    pub execution_id: Option<String>,
    /// Activity, orchestration, or event name.
    pub name: Option<String>,
    /// Event type tag.
    pub event_type: String,
    /// Task identifier.
    pub task_id: Option<i32>,
    /// Delayed delivery time.
    pub visible_time: Option<DateTime<Utc>>,
    /// Lock owner; never set by projection.
    pub locked_by: Option<String>,
    /// Lock expiry; never set by projection.
    pub lock_expiration: Option<DateTime<Utc>>,
    /// Reason text.
    pub reason: Option<String>,
    /// Payload text.
    pub payload_text: Option<String>,
    /// Identity of the stored payload.
    pub payload_id: Option<PayloadId>,
    /// Schema or version tag.
    pub version: Option<String>,
}

impl TaskEventRow {
    /// Returns the value of one column.
    #[must_use]
    pub fn value(&self, column: TaskEventColumn) -> ColumnValue<'_> {
        match column {
            TaskEventColumn::InstanceId => ColumnValue::Text(Some(&self.instance_id)),
            TaskEventColumn::ExecutionId => ColumnValue::Text(self.execution_id.as_deref()),
            TaskEventColumn::Name => ColumnValue::Text(self.name.as_deref()),
            TaskEventColumn::EventType => ColumnValue::Text(Some(&self.event_type)),
            TaskEventColumn::TaskId => ColumnValue::Int32(self.task_id),
            TaskEventColumn::VisibleTime => ColumnValue::Timestamp(self.visible_time),
            TaskEventColumn::LockedBy => ColumnValue::Text(self.locked_by.as_deref()),
            TaskEventColumn::LockExpiration => ColumnValue::Timestamp(self.lock_expiration),
            TaskEventColumn::Reason => ColumnValue::Text(self.reason.as_deref()),
            TaskEventColumn::PayloadText => ColumnValue::Text(self.payload_text.as_deref()),
            TaskEventColumn::PayloadId => {
                ColumnValue::Uuid(self.payload_id.map(PayloadId::into_inner))
            }
            TaskEventColumn::Version => ColumnValue::Text(self.version.as_deref()),
        }
    }

    /// Returns all column values in wire order.
    #[must_use]
    pub fn values(&self) -> [ColumnValue<'_>; 12] {
        TaskEventColumn::ALL.map(|column| self.value(column))
    }

    /// Returns whether the row carries reason or payload text.
    #[must_use]
    pub const fn has_payload_content(&self) -> bool {
        self.reason.is_some() || self.payload_text.is_some()
    }
}
