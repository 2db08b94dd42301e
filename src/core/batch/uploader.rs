//! Chunked upload of an arbitrary number of requests

use super::batch::{Batch, MAX_BATCH_SIZE};
use super::types::{BatchResponse, RequestError, ResultSlot, UploadSummary};
use crate::config::BatchingConfig;
use crate::core::client::{BatchApi, default_api};
use crate::utils::error::{Result, RetryPolicy, UploadError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default number of requests per batch
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Splits a request list into sequential batches and drives each to completion
pub struct Uploader<C: BatchApi> {
    api: Arc<C>,
    policy: RetryPolicy,
    chunk_size: usize,
    total: usize,
    /// Requests not handed to a batch yet
    pending: Vec<C::Request>,
    batches: Vec<Batch<C>>,
}

impl<C: BatchApi> Uploader<C> {
    /// Create an uploader over `requests`, in order
    pub fn new(requests: Vec<C::Request>, api: Arc<C>) -> Self {
        Self {
            api,
            policy: RetryPolicy::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            total: requests.len(),
            pending: requests,
            batches: Vec::new(),
        }
    }

    /// Create an uploader using the process-wide default API client
    pub fn with_default_api(requests: Vec<C::Request>) -> Result<Self>
    where
        C: 'static,
    {
        Ok(Self::new(requests, default_api::<C>()?))
    }

    /// Retry policy applied to every batch
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Apply chunk size and retry settings from configuration
    pub fn with_config(mut self, config: &BatchingConfig) -> Self {
        self.policy = config.retry.to_policy();
        self.chunk_size = config.chunk_size;
        self
    }

    pub fn api(&self) -> &Arc<C> {
        &self.api
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of requests handed to the uploader
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Batches created so far, in chunk order
    pub fn batches(&self) -> &[Batch<C>] {
        &self.batches
    }

    /// Execute every request with the configured chunk size
    pub async fn execute(&mut self) -> Result<()> {
        self.execute_with_chunk_size(self.chunk_size).await
    }

    /// Execute every request in chunks of `chunk_size`.
    ///
    /// A chunk that exhausts its retries does not stop the following chunks.
    /// Once all chunks ran, fails with [`UploadError::BatchExecution`] if any
    /// request ended with an error.
    pub async fn execute_with_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
        if !(1..=MAX_BATCH_SIZE).contains(&chunk_size) {
            return Err(UploadError::invalid_chunk_size(chunk_size, MAX_BATCH_SIZE));
        }

        info!(
            "Uploading {} requests in chunks of {}",
            self.pending.len(),
            chunk_size
        );

        let mut remaining = std::mem::take(&mut self.pending).into_iter();
        loop {
            let chunk: Vec<C::Request> = remaining.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }

            let mut batch = Batch::with_retry_policy(chunk, Arc::clone(&self.api), self.policy)?;
            let outcome = batch.execute().await;
            self.batches.push(batch);

            match outcome {
                Ok(()) => {}
                Err(UploadError::RetriesExhausted { attempts, pending }) => {
                    warn!(
                        "Chunk #{} left {} requests unsettled after {} attempts",
                        self.batches.len(),
                        pending,
                        attempts
                    );
                }
                Err(e) => {
                    self.pending = remaining.collect();
                    return Err(e);
                }
            }
        }

        let errors: Vec<RequestError> = self.errors().flatten().cloned().collect();
        if !errors.is_empty() {
            let error = UploadError::batch_execution(self.total, errors);
            error!("{}", error);
            return Err(error);
        }

        info!(
            "Uploaded {} requests in {} batches",
            self.total,
            self.batches.len()
        );
        Ok(())
    }

    /// Requests of executed batches in caller order, empty before execution
    pub fn requests(&self) -> impl Iterator<Item = &C::Request> + '_ {
        self.batches
            .iter()
            .flat_map(|batch| batch.requests().iter())
    }

    /// Requests not handed to a batch yet
    pub fn queued(&self) -> &[C::Request] {
        &self.pending
    }

    /// Responses of executed requests, `None` where a request has not succeeded
    pub fn responses(&self) -> impl Iterator<Item = Option<&BatchResponse>> + '_ {
        self.batches.iter().flat_map(|batch| batch.responses())
    }

    /// Errors of executed requests, `None` where a request has not failed
    pub fn errors(&self) -> impl Iterator<Item = Option<&RequestError>> + '_ {
        self.batches.iter().flat_map(|batch| batch.errors())
    }

    /// `(request, response, error)` triples of executed requests in caller order
    pub fn items(
        &self,
    ) -> impl Iterator<Item = (&C::Request, Option<&BatchResponse>, Option<&RequestError>)> + '_
    {
        self.batches.iter().flat_map(|batch| batch.items())
    }

    /// Outcome counts over every request
    pub fn summary(&self) -> UploadSummary {
        let mut summary = UploadSummary {
            total: self.total,
            unsettled: self.pending.len(),
            ..UploadSummary::default()
        };

        for slot in self.batches.iter().flat_map(|batch| batch.slots()) {
            match slot {
                ResultSlot::Unsettled => summary.unsettled += 1,
                ResultSlot::Succeeded(_) => summary.succeeded += 1,
                ResultSlot::Failed(_) => summary.failed += 1,
            }
        }

        summary
    }
}
