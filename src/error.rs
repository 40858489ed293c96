//! # Errors
//!
//! Typed errors surfaced by secure key lifecycle operations.
//!
//! Every error is returned to the caller as-is. Nothing in this crate retries
//! or swallows a failure; retry policy belongs to the orchestrator.

use thiserror::Error;

/// Errors returned by the secure key controller and its transport
#[derive(Debug, Error)]
pub enum SecureKeyError {
    /// The request could not be assembled (bad address, empty key name,
    /// unserializable body). Indicates a caller or addressing bug, not a
    /// transient condition.
    #[error("failed to construct request: {0}")]
    RequestConstruction(String),

    /// The backend answered with a non-2xx status, or no answer was received
    /// at all (network, DNS, connection refused, timeout).
    #[error("{}", remote_call_message(.status, .body))]
    RemoteCall {
        /// HTTP status, `None` when the request never produced a response
        status: Option<u16>,
        /// Response body, or the transport error text when there was no response
        body: String,
    },

    /// The listing response was not a JSON array of `{"name": ...}` records.
    #[error("failed to decode secure key listing: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SecureKeyError {
    /// Build a `RemoteCall` error for a response with the given status
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteCall {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Build a `RemoteCall` error for a request that never got a response
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::RemoteCall {
            status: None,
            body: detail.into(),
        }
    }

    /// HTTP status carried by a `RemoteCall` error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteCall { status, .. } => *status,
            _ => None,
        }
    }

    /// Short label used for metrics and structured logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestConstruction(_) => "request_construction",
            Self::RemoteCall { .. } => "remote_call",
            Self::Decode(_) => "decode",
        }
    }
}

fn remote_call_message(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("remote call failed with HTTP {code}: {body}"),
        None => format!("remote call failed: {body}"),
    }
}

pub type Result<T> = std::result::Result<T, SecureKeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_carries_code_and_body() {
        let err = SecureKeyError::remote_status(404, "secure key not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), "remote_call");
        assert_eq!(
            err.to_string(),
            "remote call failed with HTTP 404: secure key not found"
        );
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = SecureKeyError::transport("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "remote call failed: connection refused");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<Vec<String>>("not-json").unwrap_err();
        let err: SecureKeyError = serde_err.into();
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().starts_with("failed to decode secure key listing"));
    }
}
