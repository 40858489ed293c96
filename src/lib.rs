//! Secure Key Controller Library
//!
//! Declarative lifecycle management for secure keys: namespaced, named,
//! write-only secrets stored by a v3 REST control plane.
//!
//! An orchestrator drives four operations through the [`resource::Resource`]
//! trait: `exists` before planning, `create`/`delete` to realize a plan, and
//! `read` to refresh after a mutation. Secure keys are immutable once created;
//! the attribute schema in [`resource::schema`] tells a planner that any change
//! means delete + recreate.
//!
//! ```no_run
//! use securekey_controller::prelude::*;
//!
//! # async fn run() -> securekey_controller::error::Result<()> {
//! let controller = SecureKeyResource::from_config(ControllerConfig::from_env())?;
//! let spec = SecureKeySpec::builder("db-password", "hunter2")
//!     .namespace("analytics")
//!     .description("primary database")
//!     .build()?;
//!
//! let id = controller.id_for(&spec);
//! if !controller.exists(&id).await? {
//!     controller.create(&spec).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod observability;
pub mod paths;
pub mod resource;
pub mod transport;

pub mod prelude {
    //! Common imports for driving secure keys
    pub use crate::config::ControllerConfig;
    pub use crate::error::{Result, SecureKeyError};
    pub use crate::resource::schema::secure_key_schema;
    pub use crate::resource::{
        Resource, SecureKeyId, SecureKeyResource, SecureKeySpec, SecureKeySpecBuilder,
    };
    pub use crate::transport::{HttpMethod, HttpTransport, ReqwestTransport};
}
