//! Error recovery utilities
//!
//! This module provides the exponential backoff policy used to resubmit
//! transiently failing requests.

mod retry;

pub use retry::{
    DEFAULT_BACKOFF_MAX, DEFAULT_BACKOFF_MIN, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_MAX_ATTEMPTS,
    RetryPolicy,
};
