//! Error handling utilities
//!
//! This module provides the crate error type and retry/backoff recovery helpers.

pub mod error;
pub mod recovery;

pub use error::*;
pub use recovery::*;
