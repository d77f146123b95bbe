//! Then steps for task event projection BDD scenarios.

use super::world::{ProjectionOutcome, ProjectionWorld};
use rstest_bdd_macros::then;

#[then("{count:usize} rows are produced in message order")]
fn rows_in_message_order(world: &ProjectionWorld, count: usize) -> Result<(), eyre::Report> {
    let rows = world.rows()?;
    if rows.len() != count {
        return Err(eyre::eyre!("expected {count} rows, found {}", rows.len()));
    }
    let produced: Vec<_> = rows.iter().map(|row| row.event_type.as_str()).collect();
    let expected: Vec<_> = world
        .messages
        .iter()
        .map(|message| message.event().event_type().as_str())
        .collect();
    if produced != expected {
        return Err(eyre::eyre!("expected order {expected:?}, got {produced:?}"));
    }
    Ok(())
}

#[then("row {position:usize} has a fresh payload identity")]
fn row_has_fresh_identity(world: &ProjectionWorld, position: usize) -> Result<(), eyre::Report> {
    let payload_id = world.row(position)?.payload_id;
    if payload_id.is_none() || payload_id == world.recorded {
        return Err(eyre::eyre!(
            "expected a fresh payload identity, got {payload_id:?}"
        ));
    }
    Ok(())
}

#[then("row {position:usize} has no payload identity")]
fn row_has_no_identity(world: &ProjectionWorld, position: usize) -> Result<(), eyre::Report> {
    let payload_id = world.row(position)?.payload_id;
    if payload_id.is_some() {
        return Err(eyre::eyre!("expected no payload identity, got {payload_id:?}"));
    }
    Ok(())
}

#[then("row {position:usize} reuses the recorded payload identity")]
fn row_reuses_recorded_identity(
    world: &ProjectionWorld,
    position: usize,
) -> Result<(), eyre::Report> {
    let payload_id = world.row(position)?.payload_id;
    if world.recorded.is_none() || payload_id != world.recorded {
        return Err(eyre::eyre!(
            "expected recorded identity {:?}, got {payload_id:?}",
            world.recorded
        ));
    }
    Ok(())
}

#[then("no rows are produced")]
fn no_rows_are_produced(world: &ProjectionWorld) -> Result<(), eyre::Report> {
    match &world.outcome {
        Some(ProjectionOutcome::NoRows) => Ok(()),
        other => Err(eyre::eyre!("expected no rows, got {other:?}")),
    }
}
