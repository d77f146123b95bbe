//! Projection of task messages onto task event rows.

use super::{
    DurableEventIntrospector, PayloadIdStrategy, PayloadIdentityResolver, ProjectionConfig,
};
use crate::task_event::{
    domain::{MalformedEventError, TaskEventRow, TaskMessage},
    ports::{EventIntrospector, PayloadIdAllocator, PayloadIdentityLookup},
};
use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// Converts task messages into canonical task event rows.
///
/// Rows are produced lazily, one per pull, so at most one row is
/// materialized at a time regardless of batch size. Callers should stream
/// the rows straight into the transfer mechanism rather than collecting
/// them.
///
/// # Examples
///
/// ```
/// use durastore::task_event::domain::{
///     EventKind, HistoryEvent, OrchestrationInstance, TaskMessage,
/// };
/// use durastore::task_event::services::{ProjectedRows, TaskEventProjector};
/// use mockable::DefaultClock;
///
/// let projector = TaskEventProjector::default();
/// assert!(matches!(projector.project_batch(&[], None), ProjectedRows::NoRows));
///
/// let message = TaskMessage::new(
///     OrchestrationInstance::new("order-42", "exec-1").expect("valid instance"),
///     HistoryEvent::new(
///         0,
///         EventKind::TaskScheduled {
///             name: "ChargeCard".to_owned(),
///             version: None,
///             input: Some("42".to_owned()),
///         },
///         &DefaultClock,
///     ),
/// );
/// let rows: Vec<_> = projector.project_single(&message).collect();
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TaskEventProjector<I = DurableEventIntrospector, A = PayloadIdStrategy> {
    introspector: I,
    allocator: A,
}

impl TaskEventProjector {
    /// Creates a projector with the default introspection rules and the
    /// configured allocation policy.
    #[must_use]
    pub const fn from_config(config: &ProjectionConfig) -> Self {
        Self::new(DurableEventIntrospector, config.payload_ids)
    }
}

impl Default for TaskEventProjector {
    fn default() -> Self {
        Self::from_config(&ProjectionConfig::default())
    }
}

impl<I, A> TaskEventProjector<I, A>
where
    I: EventIntrospector,
    A: PayloadIdAllocator,
{
    /// Creates a projector from explicit introspection and allocation
    /// policies.
    #[must_use]
    pub const fn new(introspector: I, allocator: A) -> Self {
        Self {
            introspector,
            allocator,
        }
    }

    /// Projects a batch of outbound messages.
    ///
    /// Returns [`ProjectedRows::NoRows`] for an empty batch so callers can
    /// skip the database write entirely. Otherwise the rows follow input
    /// order and reuse identities recorded in `payloads`.
    #[must_use]
    pub fn project_batch<'a>(
        &'a self,
        messages: &'a [TaskMessage],
        payloads: Option<&'a dyn PayloadIdentityLookup>,
    ) -> ProjectedRows<'a, I, A> {
        if messages.is_empty() {
            tracing::debug!("no outbound task messages to project");
            return ProjectedRows::NoRows;
        }
        ProjectedRows::Rows(TaskEventRows {
            projector: self,
            messages: messages.iter(),
            payloads,
        })
    }

    /// Projects a single message.
    ///
    /// No identity lookup is consulted, so a fresh payload identity is
    /// minted whenever the event carries reason or payload text.
    #[must_use]
    pub fn project_single<'a>(&'a self, message: &'a TaskMessage) -> TaskEventRows<'a, I, A> {
        TaskEventRows {
            projector: self,
            messages: slice::from_ref(message).iter(),
            payloads: None,
        }
    }

    /// Builds the row for one message.
    ///
    /// # Errors
    ///
    /// Returns the introspector's [`MalformedEventError`] unchanged.
    pub fn project(
        &self,
        message: &TaskMessage,
        payloads: Option<&dyn PayloadIdentityLookup>,
    ) -> Result<TaskEventRow, MalformedEventError> {
        let columns = self.introspector.columns(message.event())?;
        let payload_id = PayloadIdentityResolver::new(&self.allocator).resolve(
            message,
            columns.has_content(),
            payloads,
        );
        let instance = message.orchestration_instance();

        // LockedBy and LockExpiration are left for the work dispatcher.
        Ok(TaskEventRow {
            instance_id: instance.instance_id().to_owned(),
            execution_id: instance.execution_id().map(str::to_owned),
            name: columns.name,
            event_type: columns.event_type.as_str().to_owned(),
            task_id: columns.task_id,
            visible_time: columns.visible_time,
            locked_by: None,
            lock_expiration: None,
            reason: columns.reason,
            payload_text: columns.payload_text,
            payload_id,
            version: columns.version,
        })
    }
}

/// Outcome of projecting a batch.
#[derive(Debug)]
pub enum ProjectedRows<'a, I = DurableEventIntrospector, A = PayloadIdStrategy> {
    /// The batch was empty; nothing should be written.
    NoRows,
    /// One lazily produced row per message.
    Rows(TaskEventRows<'a, I, A>),
}

impl<'a, I, A> ProjectedRows<'a, I, A> {
    /// Returns whether the batch produced no rows.
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    /// Returns the row iterator, or `None` for an empty batch.
    #[must_use]
    pub fn into_rows(self) -> Option<TaskEventRows<'a, I, A>> {
        match self {
            Self::NoRows => None,
            Self::Rows(rows) => Some(rows),
        }
    }
}

/// Lazy, single-pass sequence of projected rows.
///
/// Each item is built on demand when pulled. The sequence is consumed by
/// iteration; re-project to enumerate again.
pub struct TaskEventRows<'a, I = DurableEventIntrospector, A = PayloadIdStrategy> {
    projector: &'a TaskEventProjector<I, A>,
    messages: slice::Iter<'a, TaskMessage>,
    payloads: Option<&'a dyn PayloadIdentityLookup>,
}

impl<I, A> fmt::Debug for TaskEventRows<'_, I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskEventRows")
            .field("remaining", &self.messages.len())
            .field("has_payload_lookup", &self.payloads.is_some())
            .finish_non_exhaustive()
    }
}

impl<I, A> Iterator for TaskEventRows<'_, I, A>
where
    I: EventIntrospector,
    A: PayloadIdAllocator,
{
    type Item = Result<TaskEventRow, MalformedEventError>;

    fn next(&mut self) -> Option<Self::Item> {
        let message = self.messages.next()?;
        Some(self.projector.project(message, self.payloads))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.messages.size_hint()
    }
}

impl<I, A> ExactSizeIterator for TaskEventRows<'_, I, A>
where
    I: EventIntrospector,
    A: PayloadIdAllocator,
{
}

impl<I, A> FusedIterator for TaskEventRows<'_, I, A>
where
    I: EventIntrospector,
    A: PayloadIdAllocator,
{
}
