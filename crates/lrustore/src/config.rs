//! Store configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of entries a store holds
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Configuration for an [`Lru`](crate::Lru) store
///
/// Deserializable so it can sit inside a larger application config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LruConfig {
    /// Maximum number of entries
    pub capacity: usize,
}

impl Default for LruConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl LruConfig {
    /// Create a config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check that the config describes a usable store
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
