//! Port contracts for task event marshalling.
//!
//! Ports define the capabilities projection depends on (identity lookup,
//! identity allocation, event introspection) and the transfer boundary rows
//! are streamed into.

pub mod allocator;
pub mod introspection;
pub mod payload_identity;
pub mod sink;

pub use allocator::PayloadIdAllocator;
pub use introspection::{EventColumns, EventIntrospector};
pub use payload_identity::PayloadIdentityLookup;
pub use sink::{TaskEventSink, TaskEventSinkError, TaskEventSinkResult};
