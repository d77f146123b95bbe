//! Default column extraction rules for orchestration history events.

use crate::task_event::{
    domain::{EventKind, EventType, HistoryEvent, MalformedEventError},
    ports::{EventColumns, EventIntrospector},
};

/// Extracts row columns following the durable task store conventions.
///
/// - `Name` is set for execution starts, scheduled activities, created
///   sub-orchestrations, and raised or sent events. These require a
///   non-blank name.
/// - `TaskID` links completions back to the scheduling event: scheduling
///   events use their own event ID, completions and failures the scheduled
///   ID, fired timers the timer ID.
/// - `VisibleTime` delays delivery of fired timers and scheduled starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurableEventIntrospector;

impl EventIntrospector for DurableEventIntrospector {
    fn columns(&self, event: &HistoryEvent) -> Result<EventColumns, MalformedEventError> {
        let event_type = event.event_type();
        let mut columns = EventColumns::new(event_type);

        match event.kind() {
            EventKind::ExecutionStarted {
                name,
                version,
                input,
                scheduled_start_time,
            } => {
                columns.name = Some(required_name(event, name)?);
                columns.version.clone_from(version);
                columns.payload_text.clone_from(input);
                columns.visible_time = *scheduled_start_time;
            }
            EventKind::ExecutionCompleted {
                result,
                failure_reason,
            } => {
                columns.payload_text.clone_from(result);
                columns.reason.clone_from(failure_reason);
            }
            EventKind::ExecutionTerminated { input } => {
                columns.payload_text.clone_from(input);
            }
            EventKind::ExecutionSuspended { reason } | EventKind::ExecutionResumed { reason } => {
                columns.reason.clone_from(reason);
            }
            EventKind::TaskScheduled {
                name,
                version,
                input,
            } => {
                columns.name = Some(required_name(event, name)?);
                columns.version.clone_from(version);
                columns.payload_text.clone_from(input);
                columns.task_id = Some(task_id(event_type, event.event_id())?);
            }
            EventKind::TaskCompleted {
                task_scheduled_id,
                result,
            }
            | EventKind::SubOrchestrationInstanceCompleted {
                task_scheduled_id,
                result,
            } => {
                columns.payload_text.clone_from(result);
                columns.task_id = Some(task_id(event_type, *task_scheduled_id)?);
            }
            EventKind::TaskFailed {
                task_scheduled_id,
                reason,
                details,
            }
            | EventKind::SubOrchestrationInstanceFailed {
                task_scheduled_id,
                reason,
                details,
            } => {
                columns.reason.clone_from(reason);
                columns.payload_text.clone_from(details);
                columns.task_id = Some(task_id(event_type, *task_scheduled_id)?);
            }
            EventKind::SubOrchestrationInstanceCreated {
                name,
                version,
                input,
                ..
            } => {
                columns.name = Some(required_name(event, name)?);
                columns.version.clone_from(version);
                columns.payload_text.clone_from(input);
                columns.task_id = Some(task_id(event_type, event.event_id())?);
            }
            EventKind::TimerCreated { .. } => {
                columns.task_id = Some(task_id(event_type, event.event_id())?);
            }
            EventKind::TimerFired { timer_id, fire_at } => {
                columns.task_id = Some(task_id(event_type, *timer_id)?);
                columns.visible_time = Some(*fire_at);
            }
            EventKind::EventRaised { name, input } | EventKind::EventSent { name, input, .. } => {
                columns.name = Some(required_name(event, name)?);
                columns.payload_text.clone_from(input);
            }
            EventKind::GenericEvent { data } => {
                columns.payload_text.clone_from(data);
            }
        }

        Ok(columns)
    }
}

fn required_name(event: &HistoryEvent, name: &str) -> Result<String, MalformedEventError> {
    if name.trim().is_empty() {
        return Err(MalformedEventError::MissingName {
            event_type: event.event_type(),
            event_id: event.event_id(),
        });
    }
    Ok(name.to_owned())
}

const fn task_id(event_type: EventType, value: i32) -> Result<i32, MalformedEventError> {
    if value < 0 {
        return Err(MalformedEventError::NegativeTaskId {
            event_type,
            task_id: value,
        });
    }
    Ok(value)
}
