//! Configuration loading utilities
//!
//! This module loads configuration overrides from environment variables.

use super::Config;
use crate::utils::error::{Result, UploadError};
use std::env;
use std::str::FromStr;
use tracing::debug;

pub const ENV_CHUNK_SIZE: &str = "BATCH_CHUNK_SIZE";
pub const ENV_MAX_ATTEMPTS: &str = "BATCH_MAX_ATTEMPTS";
pub const ENV_BACKOFF_MULTIPLIER_MS: &str = "BATCH_BACKOFF_MULTIPLIER_MS";
pub const ENV_BACKOFF_MIN_MS: &str = "BATCH_BACKOFF_MIN_MS";
pub const ENV_BACKOFF_MAX_MS: &str = "BATCH_BACKOFF_MAX_MS";
pub const ENV_LOG_LEVEL: &str = "BATCH_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "BATCH_LOG_JSON";

impl Config {
    /// Load configuration from the process environment (and a `.env` file, if present)
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(chunk_size) = parse(&lookup, ENV_CHUNK_SIZE)? {
            config.batching.chunk_size = chunk_size;
        }
        if let Some(max_attempts) = parse(&lookup, ENV_MAX_ATTEMPTS)? {
            config.batching.retry.max_attempts = max_attempts;
        }
        if let Some(multiplier) = parse(&lookup, ENV_BACKOFF_MULTIPLIER_MS)? {
            config.batching.retry.backoff_multiplier_ms = multiplier;
        }
        if let Some(min) = parse(&lookup, ENV_BACKOFF_MIN_MS)? {
            config.batching.retry.backoff_min_ms = min;
        }
        if let Some(max) = parse(&lookup, ENV_BACKOFF_MAX_MS)? {
            config.batching.retry.backoff_max_ms = max;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(json) = parse(&lookup, ENV_LOG_JSON)? {
            config.logging.json = json;
        }

        config.validate()?;
        debug!("Configuration loaded from environment variables");
        Ok(config)
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e| UploadError::config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}
