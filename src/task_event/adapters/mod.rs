//! Adapter implementations for task event marshalling ports.

pub mod memory;
pub mod postgres;
