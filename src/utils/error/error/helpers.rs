//! Helper functions for creating and inspecting specific error types

use super::types::UploadError;
use crate::core::batch::RequestError;

impl UploadError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn oversized_batch(size: usize, max: usize) -> Self {
        Self::OversizedBatch { size, max }
    }

    pub fn invalid_chunk_size(chunk_size: usize, max: usize) -> Self {
        Self::InvalidChunkSize { chunk_size, max }
    }

    pub fn retries_exhausted(attempts: u32, pending: usize) -> Self {
        Self::RetriesExhausted { attempts, pending }
    }

    pub fn batch_execution(total: usize, errors: Vec<RequestError>) -> Self {
        Self::BatchExecution {
            failed: errors.len(),
            total,
            errors,
        }
    }
}

impl UploadError {
    /// Errors raised immediately by a constructor or argument check, before any
    /// request has been submitted.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch | Self::OversizedBatch { .. } | Self::InvalidChunkSize { .. }
        )
    }

    /// Per-request errors carried by an aggregate failure, empty for every other variant.
    pub fn request_errors(&self) -> &[RequestError] {
        match self {
            Self::BatchExecution { errors, .. } => errors,
            _ => &[],
        }
    }
}
