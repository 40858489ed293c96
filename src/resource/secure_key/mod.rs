//! # Secure Key Resource
//!
//! Lifecycle controller for namespaced secure keys on the v3 REST surface.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | create | PUT | `/v3/namespaces/{namespace}/securekeys/{name}` |
//! | delete | DELETE | `/v3/namespaces/{namespace}/securekeys/{name}` |
//! | exists | GET | `/v3/namespaces/{namespace}/securekeys` |
//!
//! The backend never returns a stored value, so `read` is a no-op and only
//! presence can be observed. There is no single-key lookup either: `exists`
//! lists the whole namespace and scans it for the name.

mod operations;
mod requests;
mod responses;

pub use requests::PutSecureKeyRequest;
pub use responses::SecureKeyRecord;

use crate::config::ControllerConfig;
use crate::error::{Result, SecureKeyError};
use crate::paths::SecureKeyPath;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::collections::BTreeMap;
use zeroize::Zeroizing;

/// Desired state of a secure key
///
/// Construct-once value: there are no setters. A different value for any
/// attribute is a different desired object, and realizing it means replacing
/// the remote key.
#[derive(Clone)]
pub struct SecureKeySpec {
    namespace: String,
    name: String,
    data: Zeroizing<String>,
    description: String,
    properties: BTreeMap<String, String>,
}

impl std::fmt::Debug for SecureKeySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureKeySpec")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("data", &"<redacted>")
            .field("description", &self.description)
            .field("properties", &self.properties)
            .finish()
    }
}

impl SecureKeySpec {
    /// Start building a spec; `name` and `data` are required
    pub fn builder(name: impl Into<String>, data: impl Into<String>) -> SecureKeySpecBuilder {
        SecureKeySpecBuilder {
            namespace: String::new(),
            name: name.into(),
            data: Zeroizing::new(data.into()),
            description: String::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Declared namespace; empty means the configured default
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Attributes whose values differ between `self` and `other`
    ///
    /// Namespaces are compared after substituting `default_namespace` for an
    /// empty value, so declaring the default explicitly is not a change.
    #[must_use]
    pub fn changed_attributes(
        &self,
        other: &SecureKeySpec,
        default_namespace: &str,
    ) -> Vec<&'static str> {
        let resolve = |ns: &str| {
            if ns.is_empty() {
                default_namespace.to_string()
            } else {
                ns.to_string()
            }
        };

        let mut changed = Vec::new();
        if self.data.as_str() != other.data.as_str() {
            changed.push("data");
        }
        if self.description != other.description {
            changed.push("description");
        }
        if resolve(&self.namespace) != resolve(&other.namespace) {
            changed.push("namespace");
        }
        if self.name != other.name {
            changed.push("name");
        }
        if self.properties != other.properties {
            changed.push("properties");
        }
        changed
    }
}

/// Builder for [`SecureKeySpec`]
pub struct SecureKeySpecBuilder {
    namespace: String,
    name: String,
    data: Zeroizing<String>,
    description: String,
    properties: BTreeMap<String, String>,
}

impl std::fmt::Debug for SecureKeySpecBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureKeySpecBuilder")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SecureKeySpecBuilder {
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Validate required attributes and produce the `SecureKeySpec`
    ///
    /// # Errors
    /// Returns `RequestConstruction` if `name` or `data` is empty
    pub fn build(self) -> Result<SecureKeySpec> {
        if self.name.trim().is_empty() {
            return Err(SecureKeyError::RequestConstruction(
                "secure key name is required".to_string(),
            ));
        }
        if self.data.is_empty() {
            return Err(SecureKeyError::RequestConstruction(format!(
                "data is required for secure key {}",
                self.name
            )));
        }
        Ok(SecureKeySpec {
            namespace: self.namespace,
            name: self.name,
            data: self.data,
            description: self.description,
            properties: self.properties,
        })
    }
}

/// Identifier of a secure key
///
/// Carries the full `(namespace, name)` pair so delete and existence checks
/// never depend on a namespace stored elsewhere. Its string form, the value
/// an orchestrator records as the resource id, is the key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecureKeyId {
    namespace: String,
    name: String,
}

impl SecureKeyId {
    /// An empty `namespace` is resolved to the default when the id is used
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Orchestrator-facing identifier (the key name)
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for SecureKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Secure key lifecycle controller
///
/// Holds no mutable state: every operation is self-contained given its input,
/// the injected configuration and the transport.
pub struct SecureKeyResource<T: HttpTransport> {
    transport: T,
    config: ControllerConfig,
}

impl<T: HttpTransport> std::fmt::Debug for SecureKeyResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureKeyResource")
            .field("host", &self.config.host)
            .field("default_namespace", &self.config.default_namespace)
            .finish_non_exhaustive()
    }
}

impl SecureKeyResource<ReqwestTransport> {
    /// Create a controller backed by the default reqwest transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: ControllerConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: HttpTransport> SecureKeyResource<T> {
    pub fn new(transport: T, config: ControllerConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Identifier for a desired key, with the namespace resolved
    pub fn id_for(&self, desired: &SecureKeySpec) -> SecureKeyId {
        SecureKeyId::new(
            self.config.effective_namespace(desired.namespace()),
            desired.name(),
        )
    }

    /// Per-key address used by create and delete
    pub fn key_address(&self, id: &SecureKeyId) -> String {
        let namespace = self.config.effective_namespace(id.namespace());
        SecureKeyPath::new(&self.config.host, namespace).key(id.name())
    }

    /// Namespace listing address used by exists
    pub fn collection_address(&self, namespace: &str) -> String {
        let namespace = self.config.effective_namespace(namespace);
        SecureKeyPath::new(&self.config.host, namespace).collection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SecureKeySpec {
        SecureKeySpec::builder("db-password", "hunter2")
            .description("primary database")
            .property("owner", "data-eng")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_name_and_data() {
        assert!(matches!(
            SecureKeySpec::builder("", "value").build(),
            Err(SecureKeyError::RequestConstruction(_))
        ));
        assert!(matches!(
            SecureKeySpec::builder("key", "").build(),
            Err(SecureKeyError::RequestConstruction(_))
        ));
    }

    #[test]
    fn test_debug_redacts_data() {
        let rendered = format!("{:?}", spec());
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("db-password"));
    }

    #[test]
    fn test_changed_attributes() {
        let base = spec();
        assert!(base.changed_attributes(&base.clone(), "default").is_empty());

        let rotated = SecureKeySpec::builder("db-password", "correct-horse")
            .description("primary database")
            .property("owner", "data-eng")
            .build()
            .unwrap();
        assert_eq!(base.changed_attributes(&rotated, "default"), vec!["data"]);

        let relabelled = SecureKeySpec::builder("db-password", "hunter2")
            .description("replica database")
            .properties([("owner", "platform")])
            .build()
            .unwrap();
        assert_eq!(
            base.changed_attributes(&relabelled, "default"),
            vec!["description", "properties"]
        );
    }

    #[test]
    fn test_explicit_default_namespace_is_not_a_change() {
        let implicit = spec();
        let explicit = SecureKeySpec::builder("db-password", "hunter2")
            .namespace("default")
            .description("primary database")
            .property("owner", "data-eng")
            .build()
            .unwrap();
        assert!(implicit.changed_attributes(&explicit, "default").is_empty());
        assert_eq!(
            implicit.changed_attributes(&explicit, "platform"),
            vec!["namespace"]
        );
    }

    #[test]
    fn test_id_displays_as_name() {
        let id = SecureKeyId::new("analytics", "token");
        assert_eq!(id.to_string(), "token");
        assert_eq!(id.as_str(), "token");
        assert_eq!(id.namespace(), "analytics");
    }
}
