//! Task event marshalling for the durable orchestration store.
//!
//! Outbound task messages (activity calls, timers, sub-orchestration
//! signals, external events) are projected onto rows of the task events
//! table. Large reason and payload texts are referenced by a payload
//! identity that is reused when the same event was persisted before and
//! minted otherwise. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Projection and identity resolution in [`services`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
