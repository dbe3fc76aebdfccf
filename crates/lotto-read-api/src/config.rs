//! Read API configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Query layer tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadApiConfig {
    /// How long a cached query result stays valid.
    pub cache_ttl: Duration,
    /// Number of cached query results.
    pub cache_capacity: usize,
    /// Hard cap on any caller-supplied page limit.
    pub max_page_limit: usize,
}

impl Default for ReadApiConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(30),
            cache_capacity: 256,
            max_page_limit: 100,
        }
    }
}

impl ReadApiConfig {
    /// Validate configuration; called at startup.
    pub fn validate(&self) -> Result<(), ReadApiConfigError> {
        if self.cache_capacity == 0 {
            return Err(ReadApiConfigError::InvalidCapacity);
        }
        if self.max_page_limit == 0 {
            return Err(ReadApiConfigError::InvalidPageLimit);
        }
        Ok(())
    }
}

/// Read API configuration failures. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadApiConfigError {
    /// Cache capacity cannot be zero.
    #[error("cache_capacity cannot be 0")]
    InvalidCapacity,
    /// Page limit cap cannot be zero.
    #[error("max_page_limit cannot be 0")]
    InvalidPageLimit,
}
