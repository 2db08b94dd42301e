//! Batch result types and data structures

use crate::core::taxonomy::RemoteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Successful outcome of a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Raw response payload
    pub data: Value,
}

impl BatchResponse {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Id of the object the request created or updated, when the payload carries one
    pub fn object_id(&self) -> Option<String> {
        match self.data.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for BatchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// Failed outcome of a single request.
///
/// Two errors are equal when their raw payloads are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestError {
    /// Human readable description
    pub description: String,
    /// Whether the request may be resubmitted unchanged
    pub is_transient: bool,
    /// HTTP status of the failed response, if any
    pub http_status: Option<u16>,
    /// Raw error payload
    pub data: Value,
}

impl RequestError {
    pub fn new<S: Into<String>>(description: S, is_transient: bool, data: Value) -> Self {
        Self {
            description: description.into(),
            is_transient,
            http_status: None,
            data,
        }
    }

    /// Error recorded for an index the remote handle never reported on
    pub(crate) fn missing_outcome(index: usize) -> Self {
        Self::new(
            format!("No outcome delivered for request #{}", index),
            true,
            Value::Null,
        )
    }
}

impl From<RemoteError> for RequestError {
    fn from(error: RemoteError) -> Self {
        let is_transient = error.classify();
        Self {
            description: error.message,
            is_transient,
            http_status: error.http_status,
            data: error.body,
        }
    }
}

impl PartialEq for RequestError {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_transient {
            "transient"
        } else {
            "permanent"
        };
        match self.http_status {
            Some(status) => write!(f, "[{} {}] {}", kind, status, self.description),
            None => write!(f, "[{}] {}", kind, self.description),
        }
    }
}

/// Latest outcome of one request, index-aligned with the batch requests
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultSlot {
    /// Not submitted yet, or submitted without an answer
    #[default]
    Unsettled,
    /// Remote operation completed
    Succeeded(BatchResponse),
    /// Remote operation failed
    Failed(RequestError),
}

impl ResultSlot {
    pub fn response(&self) -> Option<&BatchResponse> {
        match self {
            Self::Succeeded(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RequestError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_transient_failure(&self) -> bool {
        matches!(self, Self::Failed(error) if error.is_transient)
    }

    /// Unsettled or transiently failed, i.e. eligible for the next round
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Unsettled) || self.is_transient_failure()
    }
}

/// Result of a single registered request, as returned by a remote batch handle
#[derive(Debug, Clone)]
pub struct BatchItemResult {
    /// Index the request was registered under
    pub index: usize,
    /// Raw success payload or remote failure
    pub result: std::result::Result<Value, RemoteError>,
}

impl BatchItemResult {
    pub fn success(index: usize, data: Value) -> Self {
        Self {
            index,
            result: Ok(data),
        }
    }

    pub fn failure(index: usize, error: RemoteError) -> Self {
        Self {
            index,
            result: Err(error),
        }
    }
}

/// Outcome counts across an upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Requests handed to the uploader
    pub total: usize,
    /// Requests with a response
    pub succeeded: usize,
    /// Requests with an error, transient or permanent
    pub failed: usize,
    /// Requests without any outcome
    pub unsettled: usize,
}
