//! Batching and retry configuration

use super::*;
use crate::utils::error::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchingConfig {
    /// Requests per batch (1..=50)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Retry settings for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum execution rounds per batch
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Exponential multiplier (milliseconds)
    #[serde(default = "default_backoff_multiplier_ms")]
    pub backoff_multiplier_ms: u64,
    /// Minimum wait between rounds (milliseconds)
    #[serde(default = "default_backoff_min_ms")]
    pub backoff_min_ms: u64,
    /// Maximum wait between rounds (milliseconds)
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_multiplier_ms: default_backoff_multiplier_ms(),
            backoff_min_ms: default_backoff_min_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }
}

impl RetryConfig {
    /// Runtime retry policy for these settings
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts).with_backoff(
            Duration::from_millis(self.backoff_multiplier_ms),
            Duration::from_millis(self.backoff_min_ms),
            Duration::from_millis(self.backoff_max_ms),
        )
    }
}
