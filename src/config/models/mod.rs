//! Configuration data models
//!
//! This module defines all configuration structures used by the uploader.

#![allow(missing_docs)]

pub mod batching;
pub mod logging;

pub use batching::*;
pub use logging::*;

/// Default number of requests per batch
pub fn default_chunk_size() -> usize {
    crate::core::batch::DEFAULT_CHUNK_SIZE
}

/// Default number of execution rounds per batch
pub fn default_max_attempts() -> u32 {
    5
}

/// Default exponential backoff multiplier in milliseconds
pub fn default_backoff_multiplier_ms() -> u64 {
    1000
}

/// Default minimum wait between rounds in milliseconds
pub fn default_backoff_min_ms() -> u64 {
    1000
}

/// Default maximum wait between rounds in milliseconds
pub fn default_backoff_max_ms() -> u64 {
    10_000
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
