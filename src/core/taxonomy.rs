//! Classification of remote per-request failures
//!
//! The platform reports a transience flag in its error envelope, but its own
//! 5xx responses usually come without one even though they are load-shedding
//! signals. A failure is therefore transient when the platform says so OR when
//! the HTTP status is in the server error class.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Coarse HTTP status classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ClientError, // 4xx errors
    ServerError, // 5xx errors
    Unknown,
}

impl ErrorCategory {
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(400..=499) => Self::ClientError,
            Some(500..=599) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Whether a failure should be retried unchanged
pub fn is_transient(status: Option<u16>, platform_flag: bool) -> bool {
    platform_flag || ErrorCategory::from_status(status) == ErrorCategory::ServerError
}

/// Failure reported by a remote batch handle for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    /// HTTP status of the individual response, when the platform sent one
    pub http_status: Option<u16>,
    /// Human readable message
    pub message: String,
    /// Transience as reported by the platform itself
    pub is_transient: bool,
    /// Raw error payload
    pub body: Value,
}

impl RemoteError {
    pub fn new<S: Into<String>>(
        http_status: Option<u16>,
        message: S,
        is_transient: bool,
        body: Value,
    ) -> Self {
        Self {
            http_status,
            message: message.into(),
            is_transient,
            body,
        }
    }

    /// Build from a response status and the platform error envelope
    /// (`{"error": {"message": ..., "is_transient": ...}}`).
    pub fn from_response(status: u16, body: Value) -> Self {
        let error = body.get("error");
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let is_transient = error
            .and_then(|e| e.get("is_transient"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Self {
            http_status: Some(status),
            message,
            is_transient,
            body,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_status(self.http_status)
    }

    /// Transience after applying the server error override
    pub fn classify(&self) -> bool {
        is_transient(self.http_status, self.is_transient)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
