//! Core functionality for the uploader
//!
//! This module contains batch execution, the remote client abstraction and
//! the classification of remote failures.

pub mod batch;
pub mod client;
pub mod taxonomy;

pub use client::{BatchApi, BatchHandle, clear_default_api, default_api, set_default_api};
pub use taxonomy::{ErrorCategory, RemoteError};
