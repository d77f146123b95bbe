//! Payload identity allocation policies.

use crate::task_event::{
    domain::{PayloadId, TaskMessage},
    ports::PayloadIdAllocator,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Allocates globally unique, non-reproducible identities (UUID v4).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPayloadIds;

impl PayloadIdAllocator for RandomPayloadIds {
    fn allocate(&self, _message: &TaskMessage) -> PayloadId {
        PayloadId::new()
    }
}

/// Derives identities from the message's content.
///
/// The message's JSON encoding (instance ID, execution ID, and the whole
/// event including its payload-bearing fields) is hashed with SHA-256 and
/// the leading 16 bytes are stamped as a UUID v8. Re-projecting the same
/// event yields the same identity; events that differ in any field do not
/// collide.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicPayloadIds;

impl PayloadIdAllocator for DeterministicPayloadIds {
    fn allocate(&self, message: &TaskMessage) -> PayloadId {
        let encoded = match serde_json::to_vec(message) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    instance = %message.orchestration_instance(),
                    "task message not encodable; allocating a random payload identity"
                );
                return PayloadId::new();
            }
        };

        let digest = Sha256::digest(&encoded);
        let mut bytes = [0_u8; 16];
        for (slot, byte) in bytes.iter_mut().zip(digest.iter()) {
            *slot = *byte;
        }
        PayloadId::from_uuid(Uuid::new_v8(bytes))
    }
}

/// Selects the payload identity allocation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadIdStrategy {
    /// Random UUID v4 identities.
    #[default]
    Random,
    /// Content-derived UUID v8 identities.
    Deterministic,
}

impl PayloadIdAllocator for PayloadIdStrategy {
    fn allocate(&self, message: &TaskMessage) -> PayloadId {
        match self {
            Self::Random => RandomPayloadIds.allocate(message),
            Self::Deterministic => DeterministicPayloadIds.allocate(message),
        }
    }
}
