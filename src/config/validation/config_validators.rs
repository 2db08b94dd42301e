//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::batch::MAX_BATCH_SIZE;
use tracing::debug;

impl Validate for BatchingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating batching configuration");

        if self.chunk_size == 0 || self.chunk_size > MAX_BATCH_SIZE {
            return Err(format!(
                "Chunk size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.chunk_size
            ));
        }

        self.retry.validate()
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Retry max attempts must be greater than 0".to_string());
        }

        if self.backoff_min_ms > self.backoff_max_ms {
            return Err("Retry minimum backoff must not exceed maximum backoff".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }

        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;

        Ok(())
    }
}
