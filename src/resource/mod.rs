//! # Resources
//!
//! Declarative lifecycle contract between an orchestrator and remote objects.
//!
//! A resource exposes four operations. `exists` is called before planning,
//! `create`/`delete` realize a plan, and `read` refreshes local knowledge after
//! a mutation. There is no update: resources implementing this
//! trait are immutable once created, and a changed attribute is realized by
//! the orchestrator as `delete` followed by `create` (see [`schema`]).

use crate::error::Result;
use async_trait::async_trait;

mod common;
pub mod schema;
pub mod secure_key;

pub use schema::{AttributeSchema, AttributeType, ResourceSchema};
pub use secure_key::{SecureKeyId, SecureKeyResource, SecureKeySpec, SecureKeySpecBuilder};

/// Lifecycle operations for an immutable remote resource
#[async_trait]
pub trait Resource: Send + Sync {
    /// Declarative description of the object the orchestrator wants
    type Desired: Send + Sync;
    /// Identifier handed back to the orchestrator after creation
    type Id: Send + Sync;

    /// Realize the desired object remotely and return its identifier
    ///
    /// A failure yields no identifier; the object must be treated as not created.
    async fn create(&self, desired: &Self::Desired) -> Result<Self::Id>;

    /// Refresh local knowledge of remote state
    async fn read(&self, id: &Self::Id) -> Result<()>;

    /// Remove the object remotely
    async fn delete(&self, id: &Self::Id) -> Result<()>;

    /// Report whether the object is present remotely
    async fn exists(&self, id: &Self::Id) -> Result<bool>;
}
