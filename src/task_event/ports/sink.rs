//! Transfer port that streams projected rows into durable storage.

use super::PayloadIdentityLookup;
use crate::task_event::domain::{MalformedEventError, TaskMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task event sink operations.
pub type TaskEventSinkResult<T> = Result<T, TaskEventSinkError>;

/// Bulk transfer contract for outbound task messages.
///
/// Implementations project messages lazily and stream the rows into storage
/// without collecting the whole batch first. Retry policy, if any, belongs to
/// the caller.
#[async_trait]
pub trait TaskEventSink: Send + Sync {
    /// Writes one row per message, preserving order.
    ///
    /// Returns the number of rows written. An empty batch performs no write
    /// and returns `0`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventSinkError::MalformedEvent`] when an event cannot be
    /// projected or [`TaskEventSinkError::Persistence`] when storage fails.
    async fn send_batch(
        &self,
        messages: Vec<TaskMessage>,
        payloads: Option<Arc<dyn PayloadIdentityLookup>>,
    ) -> TaskEventSinkResult<usize>;

    /// Writes the row for a single message without identity reuse.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventSinkError::MalformedEvent`] when the event cannot be
    /// projected or [`TaskEventSinkError::Persistence`] when storage fails.
    async fn send_one(&self, message: TaskMessage) -> TaskEventSinkResult<usize>;
}

/// Errors returned by task event sink implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskEventSinkError {
    /// An event could not be projected onto a row.
    #[error(transparent)]
    MalformedEvent(#[from] MalformedEventError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEventSinkError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
