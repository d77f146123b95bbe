//! Payload identity resolution.

use crate::task_event::{
    domain::{PayloadId, TaskMessage},
    ports::{PayloadIdAllocator, PayloadIdentityLookup},
};

/// Decides which payload identity, if any, a projected row carries.
///
/// Resolution order:
///
/// 1. An identity already recorded for this exact event is reused, even when
///    the current occurrence carries no payload text.
/// 2. Otherwise, when the event has reason or payload text, a fresh identity
///    is allocated.
/// 3. Otherwise the row has no payload identity.
///
/// Freshly allocated identities are not registered back into the lookup.
pub struct PayloadIdentityResolver<'a, A: ?Sized> {
    allocator: &'a A,
}

impl<'a, A> PayloadIdentityResolver<'a, A>
where
    A: PayloadIdAllocator + ?Sized,
{
    /// Creates a resolver that mints new identities with `allocator`.
    #[must_use]
    pub const fn new(allocator: &'a A) -> Self {
        Self { allocator }
    }

    /// Resolves the payload identity for a message.
    #[must_use]
    pub fn resolve(
        &self,
        message: &TaskMessage,
        has_content: bool,
        lookup: Option<&dyn PayloadIdentityLookup>,
    ) -> Option<PayloadId> {
        if let Some(existing) = lookup.and_then(|payloads| payloads.payload_id(message.event())) {
            return Some(existing);
        }
        has_content.then(|| self.allocator.allocate(message))
    }
}
