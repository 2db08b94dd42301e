//! Utility modules for the uploader
//!
//! - **error**: Error types and retry/backoff recovery
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{Result, RetryPolicy, UploadError};
pub use logging::init_logging;
