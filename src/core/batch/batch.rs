//! Bounded batch execution with selective resubmission

use super::retry::{pending_count, should_retry_batch};
use super::types::{BatchItemResult, BatchResponse, RequestError, ResultSlot};
use crate::core::client::{BatchApi, BatchHandle};
use crate::core::taxonomy::RemoteError;
use crate::utils::error::{Result, RetryPolicy, UploadError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Maximum number of requests the platform accepts in a single batch
pub const MAX_BATCH_SIZE: usize = 50;

/// A group of at most [`MAX_BATCH_SIZE`] requests and their latest outcomes
pub struct Batch<C: BatchApi> {
    id: Uuid,
    api: Arc<C>,
    policy: RetryPolicy,
    requests: Vec<C::Request>,
    slots: Vec<ResultSlot>,
    attempts: u32,
}

impl<C: BatchApi> Batch<C> {
    /// Create a batch with the default retry policy
    pub fn new(requests: Vec<C::Request>, api: Arc<C>) -> Result<Self> {
        Self::with_retry_policy(requests, api, RetryPolicy::default())
    }

    /// Create a batch with an explicit retry policy
    pub fn with_retry_policy(
        requests: Vec<C::Request>,
        api: Arc<C>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        if requests.is_empty() {
            return Err(UploadError::EmptyBatch);
        }
        if requests.len() > MAX_BATCH_SIZE {
            return Err(UploadError::oversized_batch(requests.len(), MAX_BATCH_SIZE));
        }

        let slots = vec![ResultSlot::Unsettled; requests.len()];

        Ok(Self {
            id: Uuid::new_v4(),
            api,
            policy,
            requests,
            slots,
            attempts: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Rounds run by the last call to [`Batch::execute`]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn requests(&self) -> &[C::Request] {
        &self.requests
    }

    pub fn slots(&self) -> &[ResultSlot] {
        &self.slots
    }

    /// Responses in request order, `None` where the request has not succeeded
    pub fn responses(&self) -> impl Iterator<Item = Option<&BatchResponse>> + '_ {
        self.slots.iter().map(ResultSlot::response)
    }

    /// Errors in request order, `None` where the request has not failed
    pub fn errors(&self) -> impl Iterator<Item = Option<&RequestError>> + '_ {
        self.slots.iter().map(ResultSlot::error)
    }

    /// `(request, response, error)` triples in request order
    pub fn items(
        &self,
    ) -> impl Iterator<Item = (&C::Request, Option<&BatchResponse>, Option<&RequestError>)> + '_
    {
        self.requests
            .iter()
            .zip(&self.slots)
            .map(|(request, slot)| (request, slot.response(), slot.error()))
    }

    /// Submit every unsettled or transiently failed request, retrying with
    /// exponential backoff while transient failures remain and attempts are left.
    ///
    /// Fails with [`UploadError::RetriesExhausted`] when transient failures
    /// outlive the attempt budget. Permanent failures are left in their slots
    /// and do not make this call fail.
    pub async fn execute(&mut self) -> Result<()> {
        let span = info_span!("batch", id = %self.id, size = self.requests.len());
        self.execute_rounds().instrument(span).await
    }

    async fn execute_rounds(&mut self) -> Result<()> {
        let max_attempts = self.policy.max_attempts.max(1);
        self.attempts = 0;

        loop {
            let pending: Vec<usize> = self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_pending())
                .map(|(index, _)| index)
                .collect();

            if pending.is_empty() {
                debug!("No pending requests left");
                break;
            }

            self.attempts += 1;
            debug!(
                "Attempt {}/{}: submitting {} requests",
                self.attempts,
                max_attempts,
                pending.len()
            );
            self.run_round(&pending).await;

            if !should_retry_batch(&self.slots)
                || !self.policy.has_attempts_left(self.attempts)
            {
                break;
            }

            warn!(
                "{} requests failed transiently on attempt {}, retrying",
                pending_count(&self.slots),
                self.attempts
            );
            self.policy.wait(self.attempts).await;
        }

        if should_retry_batch(&self.slots) {
            let pending = pending_count(&self.slots);
            warn!(
                "Giving up on {} requests after {} attempts",
                pending, self.attempts
            );
            return Err(UploadError::retries_exhausted(self.attempts, pending));
        }

        info!(
            "Batch settled after {} attempts ({} failed permanently)",
            self.attempts,
            self.errors().flatten().count()
        );
        Ok(())
    }

    async fn run_round(&mut self, pending: &[usize]) {
        let mut handle = self.api.new_batch();
        for &index in pending {
            handle.add_request(index, &self.requests[index]);
        }

        let results = handle.execute().await;

        let mut delivered = vec![false; self.slots.len()];
        for BatchItemResult { index, result } in results {
            if pending.binary_search(&index).is_err() {
                warn!("Ignoring outcome for unregistered request #{}", index);
                continue;
            }
            if delivered[index] {
                warn!("Request #{} reported more than once", index);
            }
            delivered[index] = true;

            match result {
                Ok(data) => self.record_success(index, data),
                Err(remote) => self.record_failure(index, remote),
            }
        }

        for &index in pending {
            if !delivered[index] {
                warn!("No outcome delivered for request #{}", index);
                self.slots[index] = ResultSlot::Failed(RequestError::missing_outcome(index));
            }
        }
    }

    fn record_success(&mut self, index: usize, data: Value) {
        let response = BatchResponse::new(data);
        debug!(
            "Request #{}: object with id [{}] updated successfully",
            index,
            response.object_id().as_deref().unwrap_or("unknown")
        );
        self.slots[index] = ResultSlot::Succeeded(response);
    }

    fn record_failure(&mut self, index: usize, remote: RemoteError) {
        let error = RequestError::from(remote);
        error!("#{} - {}", index, error);
        self.slots[index] = ResultSlot::Failed(error);
    }
}

impl<C: BatchApi> std::fmt::Debug for Batch<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("slots", &self.slots)
            .field("attempts", &self.attempts)
            .finish()
    }
}
