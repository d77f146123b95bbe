//! Payload identity reuse across batches written to the in-memory sink.

use super::helpers::{checkout_message, clock, runtime, scheduled_activity, sink};
use durastore::task_event::{
    adapters::memory::{EventPayloadMap, InMemoryTaskEventSink},
    domain::{EventKind, HistoryEvent, PayloadId},
    ports::{PayloadIdentityLookup, TaskEventSink},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[rstest]
fn identities_recorded_from_earlier_rows_are_reused(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
    clock: DefaultClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let scheduled = scheduled_activity(1, Some("{\"sku\":7}"), &clock);

    rt.block_on(sink.send_batch(vec![checkout_message(scheduled.clone())?], None))?;
    let first_rows = sink.rows()?;
    let first = first_rows.first().ok_or("expected first row")?;
    let mut payloads = EventPayloadMap::new();
    payloads.record_row(&scheduled, first);

    let lookup: Arc<dyn PayloadIdentityLookup> = Arc::new(payloads);
    rt.block_on(sink.send_batch(vec![checkout_message(scheduled)?], Some(lookup)))?;

    let rows = sink.rows()?;
    let second = rows.last().ok_or("expected second row")?;
    assert_eq!(rows.len(), 2);
    assert!(first.payload_id.is_some());
    assert_eq!(second.payload_id, first.payload_id);
    Ok(())
}

#[rstest]
fn unrelated_outbound_events_in_the_same_tick_get_their_own_identities(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let now = chrono::Utc::now();
    let sent = |target: &str, input: &str| {
        HistoryEvent::from_persisted(
            -1,
            now,
            EventKind::EventSent {
                name: "StockReserved".to_owned(),
                instance_id: target.to_owned(),
                input: Some(input.to_owned()),
            },
        )
    };
    let to_warehouse = sent("warehouse-1", "{\"sku\":7}");
    let to_billing = sent("billing-1", "{\"total\":12}");
    let recorded = PayloadId::new();
    let mut payloads = EventPayloadMap::new();
    payloads.insert(&to_warehouse, recorded);
    let lookup: Arc<dyn PayloadIdentityLookup> = Arc::new(payloads);

    rt.block_on(sink.send_batch(
        vec![checkout_message(to_billing)?, checkout_message(to_warehouse)?],
        Some(lookup),
    ))?;

    let ids: Vec<_> = sink.rows()?.into_iter().map(|row| row.payload_id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.first().is_some_and(Option::is_some));
    assert_ne!(ids.first(), Some(&Some(recorded)));
    assert_eq!(ids.last(), Some(&Some(recorded)));
    Ok(())
}

#[rstest]
fn rows_without_payload_leave_the_map_untouched(clock: DefaultClock) {
    let event = scheduled_activity(1, None, &clock);
    let row = durastore::task_event::domain::TaskEventRow {
        instance_id: "checkout-1".to_owned(),
        execution_id: None,
        name: Some("ReserveStock".to_owned()),
        event_type: "TaskScheduled".to_owned(),
        task_id: Some(1),
        visible_time: None,
        locked_by: None,
        lock_expiration: None,
        reason: None,
        payload_text: None,
        payload_id: None,
        version: None,
    };
    let mut payloads = EventPayloadMap::new();

    payloads.record_row(&event, &row);

    assert!(payloads.is_empty());
    assert_eq!(payloads.payload_id(&event), None);
}
