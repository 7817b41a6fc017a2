//! Manager configuration.

use mnemo_arena::{ArenaConfig, ArenaError};

/// Configuration for a [`Manager`](crate::Manager).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Arena sizing.
    pub arena: ArenaConfig,
    /// Quota given to programs added without an explicit limit.
    ///
    /// `None` means the whole arena capacity.
    pub default_memory_limit: Option<usize>,
}

impl ManagerConfig {
    /// Config with an arena of `capacity` bytes and no default limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: ArenaConfig::new(capacity),
            default_memory_limit: None,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        self.arena.validate()
    }

    /// Quota for programs added without an explicit limit.
    pub fn resolved_default_limit(&self) -> usize {
        self.default_memory_limit.unwrap_or(self.arena.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_falls_back_to_capacity() {
        let config = ManagerConfig::with_capacity(4096);
        assert_eq!(config.resolved_default_limit(), 4096);
    }

    #[test]
    fn explicit_default_limit_wins() {
        let config = ManagerConfig {
            default_memory_limit: Some(128),
            ..ManagerConfig::with_capacity(4096)
        };
        assert_eq!(config.resolved_default_limit(), 128);
    }

    #[test]
    fn zero_capacity_fails_validation() {
        assert!(ManagerConfig::with_capacity(0).validate().is_err());
    }
}
