//! # Transport
//!
//! The HTTP seam between the secure key controller and the control plane.
//!
//! The controller only ever hands the transport a method, a fully built
//! address and an optional JSON body, and expects back the raw response body
//! of a 2xx answer. Authentication headers, connection pooling, timeouts and
//! any retry policy are the transport's business.

mod reqwest_client;

pub use reqwest_client::ReqwestTransport;

use crate::error::Result;
use async_trait::async_trait;

/// HTTP methods used against the secure key endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs a single HTTP request
///
/// Implementations return the response body for 2xx answers and a
/// `SecureKeyError::RemoteCall` (with status and body) for anything else.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn call(&self, method: HttpMethod, address: &str, body: Option<Vec<u8>>)
        -> Result<Vec<u8>>;
}
