//! Remote batch client abstraction
//!
//! The wire protocol, transport and authentication of the bulk endpoint live
//! behind these traits. A [`BatchApi`] opens one [`BatchHandle`] per execution
//! round, since a platform batch cannot be submitted twice.

use crate::core::batch::BatchItemResult;
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// Factory for remote batch handles
pub trait BatchApi: Send + Sync {
    /// Opaque operation descriptor
    type Request: Send + Sync;
    /// Handle for a single submission round
    type Handle: BatchHandle<Request = Self::Request>;

    /// Open a fresh, empty batch handle
    fn new_batch(&self) -> Self::Handle;
}

/// One submission round against the bulk endpoint
#[async_trait]
pub trait BatchHandle: Send {
    type Request: Send + Sync;

    /// Register a request under the index it has in its batch
    fn add_request(&mut self, index: usize, request: &Self::Request);

    /// Submit every registered request and wait for all of them.
    ///
    /// Consumes the handle. Returns exactly one result per registered index.
    async fn execute(self) -> Vec<BatchItemResult>;
}

static DEFAULT_API: Lazy<RwLock<Option<Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| RwLock::new(None));

/// Register the process-wide default API client
pub fn set_default_api<C: BatchApi + 'static>(api: Arc<C>) {
    debug!("Setting default batch API: {}", std::any::type_name::<C>());
    let api: Arc<dyn Any + Send + Sync> = api;
    *DEFAULT_API.write() = Some(api);
}

/// Fetch the process-wide default API client
pub fn default_api<C: BatchApi + 'static>() -> Result<Arc<C>> {
    let api = DEFAULT_API
        .read()
        .clone()
        .ok_or_else(|| UploadError::config("No default batch API configured"))?;

    api.downcast::<C>().map_err(|_| {
        UploadError::config(format!(
            "Default batch API is not a {}",
            std::any::type_name::<C>()
        ))
    })
}

/// Remove the process-wide default API client
pub fn clear_default_api() {
    *DEFAULT_API.write() = None;
}
