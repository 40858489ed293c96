//! reqwest-backed transport (rustls, no OpenSSL).

use super::{HttpMethod, HttpTransport};
use crate::config::ControllerConfig;
use crate::error::{Result, SecureKeyError};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Default `HttpTransport` built on a pooled `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    access_token: Option<String>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("authenticated", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a transport using the timeout and token from `config`
    ///
    /// # Errors
    /// Returns `RequestConstruction` if the HTTP client cannot be built
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                SecureKeyError::RequestConstruction(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self::with_client(http_client, config.access_token.clone()))
    }

    /// Wrap an existing client, e.g. one shared with other components
    pub fn with_client(http_client: Client, access_token: Option<String>) -> Self {
        Self {
            http_client,
            access_token,
        }
    }

    fn authorization_header(&self) -> Option<String> {
        // Add "Bearer " prefix if not already present
        self.access_token.as_ref().map(|token| {
            if token.starts_with("Bearer ") {
                token.clone()
            } else {
                format!("Bearer {token}")
            }
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn call(
        &self,
        method: HttpMethod,
        address: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let url = Url::parse(address).map_err(|e| {
            SecureKeyError::RequestConstruction(format!("invalid address {address}: {e}"))
        })?;

        let mut request = match method {
            HttpMethod::Get => self.http_client.get(url),
            HttpMethod::Put => self.http_client.put(url),
            HttpMethod::Delete => self.http_client.delete(url),
        };

        if let Some(auth_header) = self.authorization_header() {
            request = request.header("Authorization", auth_header);
        }

        if let Some(body) = body {
            request = request.header("Content-Type", "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                SecureKeyError::RequestConstruction(e.to_string())
            } else {
                SecureKeyError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SecureKeyError::transport(format!("failed to read response body: {e}")))?;

        debug!(
            "{} {} -> HTTP {} ({} bytes)",
            method,
            address,
            status.as_u16(),
            bytes.len()
        );

        if !status.is_success() {
            return Err(SecureKeyError::remote_status(
                status.as_u16(),
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }

        Ok(bytes.to_vec())
    }
}
