//! Services that turn task messages into rows.
//!
//! Projection is synchronous and performs no I/O: the resolver decides
//! payload identities and the projector assembles rows on demand.

mod allocation;
mod config;
mod introspection;
mod projector;
mod resolver;

pub use allocation::{DeterministicPayloadIds, PayloadIdStrategy, RandomPayloadIds};
pub use config::ProjectionConfig;
pub use introspection::DurableEventIntrospector;
pub use projector::{ProjectedRows, TaskEventProjector, TaskEventRows};
pub use resolver::PayloadIdentityResolver;
