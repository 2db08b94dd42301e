//! Error types for the uploader

use crate::core::batch::RequestError;
use thiserror::Error;

/// Result type alias for the uploader
pub type Result<T> = std::result::Result<T, UploadError>;

/// Main error type for batch uploads
#[derive(Error, Debug)]
pub enum UploadError {
    /// A batch was constructed without any request
    #[error("At least one request must be provided")]
    EmptyBatch,

    /// A batch was constructed with more requests than the platform accepts
    #[error("A maximum of {max} requests per batch is supported, got {size}")]
    OversizedBatch { size: usize, max: usize },

    /// Chunk size outside of the accepted range
    #[error("Chunk size must be between 1 and {max}, got {chunk_size}")]
    InvalidChunkSize { chunk_size: usize, max: usize },

    /// Some requests were still failing transiently when the attempt budget ran out
    #[error("{pending} requests still failing after {attempts} attempts")]
    RetriesExhausted { attempts: u32, pending: usize },

    /// One or more requests failed once every chunk was executed
    #[error("{failed} requests failed out of {total}")]
    BatchExecution {
        failed: usize,
        total: usize,
        errors: Vec<RequestError>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
