//! Batch and single-message write tests for the in-memory sink.

use super::helpers::{checkout_message, clock, fired_timer, runtime, scheduled_activity, sink};
use durastore::task_event::{
    adapters::memory::InMemoryTaskEventSink,
    domain::{EventKind, HistoryEvent, MalformedEventError},
    ports::{TaskEventSink, TaskEventSinkError},
    services::ProjectionConfig,
};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn empty_batch_skips_the_write(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;

    let written = rt.block_on(sink.send_batch(Vec::new(), None))?;

    assert_eq!(written, 0);
    assert_eq!(sink.write_count()?, 0);
    assert!(sink.rows()?.is_empty());
    Ok(())
}

#[rstest]
fn batch_rows_are_stored_in_message_order(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
    clock: DefaultClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let messages = vec![
        checkout_message(scheduled_activity(1, Some("{\"sku\":7}"), &clock))?,
        checkout_message(fired_timer(2, 1, &clock))?,
        checkout_message(scheduled_activity(3, None, &clock))?,
    ];

    let written = rt.block_on(sink.send_batch(messages, None))?;

    let rows = sink.rows()?;
    assert_eq!(written, 3);
    assert_eq!(sink.write_count()?, 1);
    let summary: Vec<_> = rows
        .iter()
        .map(|row| (row.event_type.as_str(), row.task_id, row.payload_id.is_some()))
        .collect();
    assert_eq!(
        summary,
        [
            ("TaskScheduled", Some(1), true),
            ("TimerFired", Some(1), false),
            ("TaskScheduled", Some(3), false),
        ]
    );
    assert!(rows.iter().all(|row| row.instance_id == "checkout-1"));
    Ok(())
}

#[rstest]
fn single_message_is_written_with_a_fresh_payload_id(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
    clock: DefaultClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let raised = checkout_message(HistoryEvent::new(
        -1,
        EventKind::EventRaised {
            name: "PaymentReceived".to_owned(),
            input: Some("99.50".to_owned()),
        },
        &clock,
    ))?;

    let written = rt.block_on(sink.send_one(raised))?;

    let rows = sink.rows()?;
    assert_eq!(written, 1);
    let row = rows.first().ok_or("expected one row")?;
    assert_eq!(row.name.as_deref(), Some("PaymentReceived"));
    assert!(row.payload_id.is_some());
    Ok(())
}

#[rstest]
fn malformed_event_discards_the_whole_batch(
    runtime: io::Result<Runtime>,
    sink: InMemoryTaskEventSink,
    clock: DefaultClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let messages = vec![
        checkout_message(scheduled_activity(1, Some("1"), &clock))?,
        checkout_message(HistoryEvent::new(
            2,
            EventKind::TaskCompleted {
                task_scheduled_id: -5,
                result: None,
            },
            &clock,
        ))?,
    ];

    let result = rt.block_on(sink.send_batch(messages, None));

    assert!(matches!(
        result,
        Err(TaskEventSinkError::MalformedEvent(
            MalformedEventError::NegativeTaskId { task_id: -5, .. }
        ))
    ));
    assert!(sink.rows()?.is_empty());
    assert_eq!(sink.write_count()?, 0);
    Ok(())
}

#[rstest]
fn deterministic_sink_reproduces_payload_ids_on_resend(
    runtime: io::Result<Runtime>,
    clock: DefaultClock,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let rt = runtime?;
    let sink = InMemoryTaskEventSink::with_config(&ProjectionConfig::deterministic());
    let message = checkout_message(scheduled_activity(1, Some("1"), &clock))?;

    rt.block_on(sink.send_one(message.clone()))?;
    rt.block_on(sink.send_one(message))?;

    let ids: Vec<_> = sink.rows()?.into_iter().map(|row| row.payload_id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.first().is_some_and(Option::is_some));
    assert_eq!(ids.first(), ids.last());
    Ok(())
}
