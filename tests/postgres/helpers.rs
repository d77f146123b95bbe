//! Shared helpers for `PostgreSQL` task event sink tests.

use durastore::task_event::{
    adapters::postgres::PostgresTaskEventSink,
    domain::{EventKind, HistoryEvent, OrchestrationInstance, TaskMessage},
    services::ProjectionConfig,
};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// Boxed error type used by test setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Table definition applied to the template database.
const CREATE_TASK_EVENTS_SQL: &str = include_str!("task_events.sql");

/// Template database name for the pre-created table.
const TEMPLATE_DB: &str = "durastore_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with `task_events` created.
///
/// # Errors
///
/// Returns an error if the template cannot be created.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            diesel::sql_query(CREATE_TASK_EVENTS_SQL)
                .execute(&mut conn)
                .map_err(|e| eyre::eyre!("SQL error: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Creates a test database from the template and returns a sink writing to it.
///
/// # Errors
///
/// Returns an error if the database or pool cannot be created.
pub fn setup_sink(
    cluster: &TestCluster,
    db_name: &str,
    config: &ProjectionConfig,
) -> Result<PostgresTaskEventSink, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    // Pool size of 1 keeps writes and read-backs on one session
    let pool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::<PgConnection>::new(url))
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(PostgresTaskEventSink::with_config(pool, config))
}

/// A stored `task_events` record as read back by the tests.
#[derive(diesel::QueryableByName, Debug)]
pub struct StoredRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub sequence_number: i64,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub instance_id: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub execution_id: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub event_type: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Integer>)]
    pub task_id: Option<i32>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub payload_text: Option<String>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub payload_id: Option<uuid::Uuid>,
}

/// Reads every stored row in insertion order.
///
/// # Errors
///
/// Returns an error if the connection or query fails.
pub fn fetch_rows(cluster: &TestCluster, db_name: &str) -> Result<Vec<StoredRow>, BoxError> {
    let url = cluster.connection().database_url(db_name);
    let mut conn = PgConnection::establish(&url).map_err(|e| Box::new(e) as BoxError)?;
    diesel::sql_query(
        "SELECT sequence_number, instance_id, execution_id, event_type, task_id, \
         payload_text, payload_id FROM task_events ORDER BY sequence_number",
    )
    .load::<StoredRow>(&mut conn)
    .map_err(|e| Box::new(e) as BoxError)
}

/// Wraps an event in a message for the `checkout-1` execution.
pub fn checkout_message(event: HistoryEvent) -> TaskMessage {
    let instance = OrchestrationInstance::new("checkout-1", "exec-1").expect("valid instance");
    TaskMessage::new(instance, event)
}

/// Builds a scheduled activity event carrying `input`.
pub fn scheduled_activity(event_id: i32, input: Option<&str>) -> HistoryEvent {
    HistoryEvent::new(
        event_id,
        EventKind::TaskScheduled {
            name: "ReserveStock".to_owned(),
            version: None,
            input: input.map(str::to_owned),
        },
        &DefaultClock,
    )
}

/// Cleans up a test database.
fn cleanup_database(cluster: &TestCluster, db_name: &str) {
    if let Err(e) = cluster.drop_database(db_name) {
        eprintln!("Warning: failed to drop test database {db_name}: {e}");
    }
}

/// Guard that ensures test database cleanup runs even if a test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Creates a guard that drops `db_name` when it goes out of scope.
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        cleanup_database(self.cluster, &self.db_name);
    }
}
