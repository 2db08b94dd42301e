//! Batch processing system for submitting many requests to a bulk endpoint
//!
//! Requests are split into batches of at most 50, each batch is executed
//! against a remote handle, and transiently failing requests are resubmitted
//! with exponential backoff.

mod batch;
mod retry;
mod types;
mod uploader;


// Re-export all public types
pub use batch::{Batch, MAX_BATCH_SIZE};
pub use retry::should_retry_batch;
pub use types::{BatchItemResult, BatchResponse, RequestError, ResultSlot, UploadSummary};
pub use uploader::{DEFAULT_CHUNK_SIZE, Uploader};
