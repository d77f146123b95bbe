//! Task messages and the orchestration instances they target.

use super::{HistoryEvent, TaskEventDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrchestrationInstance {
    instance_id: String,
    execution_id: Option<String>,
}

impl OrchestrationInstance {
    /// Creates a reference to a specific execution of an instance.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventDomainError::EmptyInstanceId`] when the instance ID
    /// is blank.
    pub fn new(
        instance_id: impl Into<String>,
        execution_id: impl Into<String>,
    ) -> Result<Self, TaskEventDomainError> {
        Self::build(instance_id.into(), Some(execution_id.into()))
    }

    /// Creates an instance-level reference with no execution ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventDomainError::EmptyInstanceId`] when the instance ID
    /// is blank.
    pub fn instance_level(instance_id: impl Into<String>) -> Result<Self, TaskEventDomainError> {
        Self::build(instance_id.into(), None)
    }

    fn build(
        instance_id: String,
        execution_id: Option<String>,
    ) -> Result<Self, TaskEventDomainError> {
        if instance_id.trim().is_empty() {
            return Err(TaskEventDomainError::EmptyInstanceId);
        }
        Ok(Self {
            instance_id,
            execution_id,
        })
    }

    /// Returns the instance identifier.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Returns the execution identifier, if this targets a specific run.
    #[must_use]
    pub fn execution_id(&self) -> Option<&str> {
        self.execution_id.as_deref()
    }
}

impl fmt::Display for OrchestrationInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.execution_id {
            Some(execution_id) => write!(f, "{}:{execution_id}", self.instance_id),
            None => f.write_str(&self.instance_id),
        }
    }
}

/// An envelope carrying one event and the instance it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMessage {
    orchestration_instance: OrchestrationInstance,
    event: HistoryEvent,
}

impl TaskMessage {
    /// Creates a task message.
    #[must_use]
    pub const fn new(orchestration_instance: OrchestrationInstance, event: HistoryEvent) -> Self {
        Self {
            orchestration_instance,
            event,
        }
    }

    /// Returns the targeted orchestration instance.
    #[must_use]
    pub const fn orchestration_instance(&self) -> &OrchestrationInstance {
        &self.orchestration_instance
    }

    /// Returns the carried event.
    #[must_use]
    pub const fn event(&self) -> &HistoryEvent {
        &self.event
    }
}
