//! Diesel row models for task event persistence.

use super::schema::task_events;
use crate::task_event::domain::{PayloadId, TaskEventRow};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Insert model for task event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_events)]
pub struct NewTaskEventRow {
    /// Owning orchestration instance.
    pub instance_id: String,
    /// Owning execution.
    pub execution_id: Option<String>,
    /// Activity, orchestration, or event name.
    pub name: Option<String>,
    /// Event type tag.
    pub event_type: String,
    /// Task identifier.
    pub task_id: Option<i32>,
    /// Delayed delivery time.
    pub visible_time: Option<DateTime<Utc>>,
    /// Lock owner set by the work dispatcher.
    pub locked_by: Option<String>,
    /// Lock expiry set by the work dispatcher.
    pub lock_expiration: Option<DateTime<Utc>>,
    /// Reason text.
    pub reason: Option<String>,
    /// Payload text.
    pub payload_text: Option<String>,
    /// Payload identity.
    pub payload_id: Option<uuid::Uuid>,
    /// Schema or version tag.
    pub version: Option<String>,
}

impl From<TaskEventRow> for NewTaskEventRow {
    fn from(row: TaskEventRow) -> Self {
        Self {
            instance_id: row.instance_id,
            execution_id: row.execution_id,
            name: row.name,
            event_type: row.event_type,
            task_id: row.task_id,
            visible_time: row.visible_time,
            locked_by: row.locked_by,
            lock_expiration: row.lock_expiration,
            reason: row.reason,
            payload_text: row.payload_text,
            payload_id: row.payload_id.map(PayloadId::into_inner),
            version: row.version,
        }
    }
}
