//! `PostgreSQL` sink that streams projected rows into `task_events`.

use super::{models::NewTaskEventRow, schema::task_events};
use crate::task_event::{
    domain::{MalformedEventError, TaskEventRow, TaskMessage},
    ports::{PayloadIdentityLookup, TaskEventSink, TaskEventSinkError, TaskEventSinkResult},
    services::{ProjectedRows, ProjectionConfig, TaskEventProjector},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by task event adapters.
pub type TaskEventPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task event sink.
///
/// Rows are pulled from the lazy projection and inserted in chunks inside a
/// single transaction, so at most one chunk is held in memory. Column length
/// limits are enforced by the database when the chunk is inserted.
#[derive(Debug, Clone)]
pub struct PostgresTaskEventSink {
    pool: TaskEventPgPool,
    projector: Arc<TaskEventProjector>,
    chunk_size: usize,
}

impl PostgresTaskEventSink {
    /// Creates a sink with the default projection configuration.
    #[must_use]
    pub fn new(pool: TaskEventPgPool) -> Self {
        Self::with_config(pool, &ProjectionConfig::default())
    }

    /// Creates a sink with the given projection configuration.
    #[must_use]
    pub fn with_config(pool: TaskEventPgPool, config: &ProjectionConfig) -> Self {
        Self {
            pool,
            projector: Arc::new(TaskEventProjector::from_config(config)),
            chunk_size: config.effective_chunk_size(),
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskEventSinkResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskEventSinkResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskEventSinkError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskEventSinkError::persistence)?
    }
}

#[async_trait]
impl TaskEventSink for PostgresTaskEventSink {
    async fn send_batch(
        &self,
        messages: Vec<TaskMessage>,
        payloads: Option<Arc<dyn PayloadIdentityLookup>>,
    ) -> TaskEventSinkResult<usize> {
        if messages.is_empty() {
            tracing::debug!("skipping task event write for empty batch");
            return Ok(0);
        }

        let projector = Arc::clone(&self.projector);
        let chunk_size = self.chunk_size;
        self.run_blocking(move |connection| {
            match projector.project_batch(&messages, payloads.as_deref()) {
                ProjectedRows::NoRows => Ok(0),
                ProjectedRows::Rows(rows) => connection
                    .transaction(|transaction| insert_streamed(transaction, rows, chunk_size)),
            }
        })
        .await
    }

    async fn send_one(&self, message: TaskMessage) -> TaskEventSinkResult<usize> {
        let projector = Arc::clone(&self.projector);
        self.run_blocking(move |connection| {
            let rows = projector.project_single(&message);
            insert_streamed(connection, rows, 1)
        })
        .await
    }
}

impl From<DieselError> for TaskEventSinkError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn insert_streamed(
    connection: &mut PgConnection,
    rows: impl Iterator<Item = Result<TaskEventRow, MalformedEventError>>,
    chunk_size: usize,
) -> TaskEventSinkResult<usize> {
    let mut chunk = Vec::with_capacity(chunk_size);
    let mut written = 0;
    let mut chunks = 0;

    for projected in rows {
        let row = projected.map_err(|err| {
            tracing::warn!(error = %err, "aborting task event batch on malformed event");
            TaskEventSinkError::from(err)
        })?;
        chunk.push(NewTaskEventRow::from(row));
        if chunk.len() >= chunk_size {
            written += flush_chunk(connection, &mut chunk)?;
            chunks += 1;
        }
    }
    if !chunk.is_empty() {
        written += flush_chunk(connection, &mut chunk)?;
        chunks += 1;
    }

    tracing::debug!(rows = written, chunks, "task event batch inserted");
    Ok(written)
}

fn flush_chunk(
    connection: &mut PgConnection,
    chunk: &mut Vec<NewTaskEventRow>,
) -> TaskEventSinkResult<usize> {
    let inserted = diesel::insert_into(task_events::table)
        .values(chunk.as_slice())
        .execute(connection)?;
    chunk.clear();
    Ok(inserted)
}
