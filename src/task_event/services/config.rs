//! Projection and transfer configuration.

use super::PayloadIdStrategy;
use serde::{Deserialize, Serialize};

/// Configuration shared by the projector and the sink adapters.
///
/// # Examples
///
/// ```
/// use durastore::task_event::services::{PayloadIdStrategy, ProjectionConfig};
///
/// let config = ProjectionConfig::default();
/// assert_eq!(config.payload_ids, PayloadIdStrategy::Random);
///
/// let replayable = ProjectionConfig::deterministic();
/// assert_eq!(replayable.payload_ids, PayloadIdStrategy::Deterministic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// How fresh payload identities are allocated.
    pub payload_ids: PayloadIdStrategy,
    /// Maximum number of rows sent per insert statement.
    pub insert_chunk_size: usize,
}

impl ProjectionConfig {
    /// Default number of rows per insert statement.
    pub const DEFAULT_INSERT_CHUNK_SIZE: usize = 500;

    /// Configuration that derives payload identities from event content.
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            payload_ids: PayloadIdStrategy::Deterministic,
            ..Self::default()
        }
    }

    /// Sets the insert chunk size.
    #[must_use]
    pub const fn with_insert_chunk_size(mut self, insert_chunk_size: usize) -> Self {
        self.insert_chunk_size = insert_chunk_size;
        self
    }

    /// Returns the insert chunk size, never less than one.
    #[must_use]
    pub const fn effective_chunk_size(&self) -> usize {
        if self.insert_chunk_size == 0 {
            1
        } else {
            self.insert_chunk_size
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            payload_ids: PayloadIdStrategy::default(),
            insert_chunk_size: Self::DEFAULT_INSERT_CHUNK_SIZE,
        }
    }
}
