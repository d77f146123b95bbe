//! In-memory task event sink for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task_event::{
    domain::{TaskEventRow, TaskMessage},
    ports::{PayloadIdentityLookup, TaskEventSink, TaskEventSinkError, TaskEventSinkResult},
    services::{ProjectedRows, ProjectionConfig, TaskEventProjector, TaskEventRows},
};

/// Thread-safe sink that keeps written rows in memory.
///
/// Each batch is applied atomically: a malformed event discards the rows
/// already streamed for that batch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskEventSink {
    projector: Arc<TaskEventProjector>,
    state: Arc<RwLock<InMemorySinkState>>,
}

#[derive(Debug, Default)]
struct InMemorySinkState {
    rows: Vec<TaskEventRow>,
    writes: usize,
}

impl InMemoryTaskEventSink {
    /// Creates an empty sink with the default projection configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with the given projection configuration.
    #[must_use]
    pub fn with_config(config: &ProjectionConfig) -> Self {
        Self {
            projector: Arc::new(TaskEventProjector::from_config(config)),
            state: Arc::default(),
        }
    }

    /// Returns a snapshot of every row written so far, in write order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventSinkError::Persistence`] when the state lock is
    /// poisoned.
    pub fn rows(&self) -> TaskEventSinkResult<Vec<TaskEventRow>> {
        let state = self.state.read().map_err(|err| {
            TaskEventSinkError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.rows.clone())
    }

    /// Returns how many non-empty writes have been applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventSinkError::Persistence`] when the state lock is
    /// poisoned.
    pub fn write_count(&self) -> TaskEventSinkResult<usize> {
        let state = self.state.read().map_err(|err| {
            TaskEventSinkError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.writes)
    }

    fn append(&self, rows: TaskEventRows<'_>) -> TaskEventSinkResult<usize> {
        let mut state = self.state.write().map_err(|err| {
            TaskEventSinkError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let start = state.rows.len();

        for projected in rows {
            match projected {
                Ok(row) => state.rows.push(row),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding task event batch with malformed event");
                    state.rows.truncate(start);
                    return Err(err.into());
                }
            }
        }

        state.writes += 1;
        let written = state.rows.len() - start;
        tracing::debug!(rows = written, "task event batch written to memory");
        Ok(written)
    }
}

#[async_trait]
impl TaskEventSink for InMemoryTaskEventSink {
    async fn send_batch(
        &self,
        messages: Vec<TaskMessage>,
        payloads: Option<Arc<dyn PayloadIdentityLookup>>,
    ) -> TaskEventSinkResult<usize> {
        match self.projector.project_batch(&messages, payloads.as_deref()) {
            ProjectedRows::NoRows => Ok(0),
            ProjectedRows::Rows(rows) => self.append(rows),
        }
    }

    async fn send_one(&self, message: TaskMessage) -> TaskEventSinkResult<usize> {
        self.append(self.projector.project_single(&message))
    }
}
