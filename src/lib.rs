//! # batch-uploader
//!
//! Batches many independent operations for a remote bulk API, submits them in
//! groups of at most 50, and resubmits the operations that failed for transient
//! reasons with exponential backoff.
//!
//! ## Features
//!
//! - **Bounded batches**: requests are chunked to the platform's 50-per-batch limit
//! - **Selective retries**: only unsettled or transiently failed requests are resubmitted
//! - **Failure taxonomy**: server errors count as transient even when the platform says otherwise
//! - **Order preserving results**: responses and errors line up with the caller's requests
//! - **Pluggable transport**: the bulk endpoint sits behind the [`BatchApi`] trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use batch_uploader::{Config, Uploader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/uploader.yaml").await?;
//!     batch_uploader::init_logging(config.logging())?;
//!
//!     let api = Arc::new(MyGraphApi::new(token));
//!     let mut uploader = Uploader::new(requests, api).with_config(config.batching());
//!
//!     if let Err(e) = uploader.execute().await {
//!         for (request, _, error) in uploader.items() {
//!             if let Some(error) = error {
//!                 eprintln!("{:?}: {}", request, error);
//!             }
//!         }
//!         return Err(e.into());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{
    Batch, BatchItemResult, BatchResponse, DEFAULT_CHUNK_SIZE, MAX_BATCH_SIZE, RequestError,
    ResultSlot, UploadSummary, Uploader, should_retry_batch,
};
pub use core::client::{BatchApi, BatchHandle, clear_default_api, default_api, set_default_api};
pub use core::taxonomy::{ErrorCategory, RemoteError};
pub use utils::error::{Result, RetryPolicy, UploadError};
pub use utils::logging::init_logging;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build information recorded by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        rust_version: env!("RUST_VERSION"),
    }
}
