//! # Lifecycle Operations
//!
//! `Resource` implementation for secure keys.
//!
//! Each operation issues at most one request and returns the first error it
//! sees. Nothing is retried and nothing is cleaned up on failure.

use async_trait::async_trait;
use tracing::{debug, debug_span, field, info, info_span, warn, Instrument, Span};

use super::requests::PutSecureKeyRequest;
use super::responses::{parse_listing, SecureKeyRecord};
use super::{SecureKeyId, SecureKeyResource, SecureKeySpec};
use crate::error::{Result, SecureKeyError};
use crate::observability::metrics;
use crate::resource::common::OperationTracker;
use crate::resource::Resource;
use crate::transport::{HttpMethod, HttpTransport};

fn require_name(id: &SecureKeyId) -> Result<()> {
    if id.name().is_empty() {
        return Err(SecureKeyError::RequestConstruction(format!(
            "secure key name is empty (namespace {})",
            id.namespace()
        )));
    }
    Ok(())
}

impl<T: HttpTransport> SecureKeyResource<T> {
    async fn put_key(&self, id: &SecureKeyId, desired: &SecureKeySpec) -> Result<()> {
        require_name(id)?;
        let address = self.key_address(id);
        let body = serde_json::to_vec(&PutSecureKeyRequest::from(desired)).map_err(|e| {
            SecureKeyError::RequestConstruction(format!(
                "failed to serialize secure key {}: {e}",
                id.name()
            ))
        })?;

        // The response body carries nothing we need
        self.transport
            .call(HttpMethod::Put, &address, Some(body))
            .await?;
        Ok(())
    }

    async fn delete_key(&self, id: &SecureKeyId) -> Result<()> {
        require_name(id)?;
        let address = self.key_address(id);
        self.transport
            .call(HttpMethod::Delete, &address, None)
            .await?;
        Ok(())
    }

    async fn list_keys(&self, namespace: &str) -> Result<Vec<SecureKeyRecord>> {
        let address = self.collection_address(namespace);
        let body = self.transport.call(HttpMethod::Get, &address, None).await?;
        let records = parse_listing(&body)?;
        metrics::observe_exists_scanned_records(records.len());
        Ok(records)
    }
}

#[async_trait]
impl<T: HttpTransport> Resource for SecureKeyResource<T> {
    type Desired = SecureKeySpec;
    type Id = SecureKeyId;

    async fn create(&self, desired: &SecureKeySpec) -> Result<SecureKeyId> {
        let id = self.id_for(desired);
        let span = info_span!(
            "securekey.create",
            securekey.namespace = id.namespace(),
            securekey.name = id.name(),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );

        async move {
            let tracker = OperationTracker::new("create", Span::current());
            info!("Creating secure key {} in namespace {}", id.name(), id.namespace());

            match self.put_key(&id, desired).await {
                Ok(()) => {
                    tracker.record_success();
                    Ok(id)
                }
                Err(e) => {
                    tracker.record_error(&e);
                    warn!("Failed to create secure key {}: {}", id.name(), e);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn read(&self, id: &SecureKeyId) -> Result<()> {
        // Secure key values are write-only: there is nothing to read back,
        // and presence is the job of `exists`.
        debug!(
            "Read of secure key {} in namespace {} is a no-op",
            id.name(),
            self.config().effective_namespace(id.namespace())
        );
        Ok(())
    }

    async fn delete(&self, id: &SecureKeyId) -> Result<()> {
        let namespace = self.config().effective_namespace(id.namespace());
        let span = info_span!(
            "securekey.delete",
            securekey.namespace = namespace,
            securekey.name = id.name(),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );

        async move {
            let tracker = OperationTracker::new("delete", Span::current());
            info!("Deleting secure key {} in namespace {}", id.name(), namespace);

            let result = self.delete_key(id).await;
            match &result {
                Ok(()) => tracker.record_success(),
                Err(e) => {
                    tracker.record_error(e);
                    warn!("Failed to delete secure key {}: {}", id.name(), e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn exists(&self, id: &SecureKeyId) -> Result<bool> {
        let namespace = self.config().effective_namespace(id.namespace());
        let span = debug_span!(
            "securekey.exists",
            securekey.namespace = namespace,
            securekey.name = id.name(),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            operation.found = field::Empty,
            error.message = field::Empty,
        );

        async move {
            let tracker = OperationTracker::new("exists", Span::current());

            let result = self
                .list_keys(namespace)
                .await
                .map(|records| records.iter().any(|record| record.name == id.name()));
            match &result {
                Ok(found) => {
                    Span::current().record("operation.found", *found);
                    tracker.record_success();
                    debug!(
                        "Secure key {} {} in namespace {}",
                        id.name(),
                        if *found { "found" } else { "not found" },
                        namespace
                    );
                }
                Err(e) => {
                    tracker.record_error(e);
                    warn!("Failed to check secure key {}: {}", id.name(), e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}
