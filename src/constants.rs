//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default control plane host (router address, without the API root)
pub const DEFAULT_HOST: &str = "http://localhost:11015";

/// Namespace substituted when a secure key does not declare one
pub const DEFAULT_NAMESPACE: &str = "default";

/// API root path segment
pub const API_VERSION_SEGMENT: &str = "v3";

/// Path segment for the namespaces collection
pub const NAMESPACES_SEGMENT: &str = "namespaces";

/// Path segment for the secure keys collection within a namespace
pub const SECURE_KEYS_SEGMENT: &str = "securekeys";

/// Default per-request timeout for the HTTP transport (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "securekey_controller=info,securekeyctl=info";
