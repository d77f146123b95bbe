//! `PostgreSQL` adapters for task event persistence.

mod models;
pub(crate) mod schema;
mod sink;

pub use models::NewTaskEventRow;
pub use sink::{PostgresTaskEventSink, TaskEventPgPool};
