//! In-memory adapters for task event marshalling.

mod payload_map;
mod sink;

pub use payload_map::EventPayloadMap;
pub use sink::InMemoryTaskEventSink;
