//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for the byte arena.
///
/// The capacity is fixed at construction; the arena never grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total size of the backing store in bytes.
    ///
    /// Default: 1_048_576 (1 MiB). Must be non-zero.
    pub capacity: usize,
}

impl ArenaConfig {
    /// Default capacity: 1 MiB.
    pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

    /// Create a config with the given capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.capacity == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "arena capacity must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
