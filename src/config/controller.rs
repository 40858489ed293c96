//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// The CLI loads a `.env` file first, then applies command-line overrides on top.
#[derive(Clone)]
pub struct ControllerConfig {
    /// Control plane host, e.g. `http://localhost:11015`
    /// The `v3` API root is appended when addresses are built
    pub host: String,
    /// Namespace used when a secure key does not declare one
    pub default_namespace: String,
    /// Bearer token sent by the HTTP transport, if the control plane requires auth
    pub access_token: Option<String>,
    /// Per-request timeout for the HTTP transport (seconds)
    pub request_timeout_secs: u64,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl std::fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("host", &self.host)
            .field("default_namespace", &self.default_namespace)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("enable_metrics", &self.enable_metrics)
            .finish()
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            host: DEFAULT_HOST.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            access_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            enable_metrics: true,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        use crate::constants::*;
        Self {
            host: env_var_or_default_str("SECUREKEY_HOST", DEFAULT_HOST),
            default_namespace: env_var_non_empty("SECUREKEY_DEFAULT_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            access_token: env_var_non_empty("SECUREKEY_ACCESS_TOKEN"),
            request_timeout_secs: env_var_or_default(
                "SECUREKEY_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            enable_metrics: env_var_or_default_bool("ENABLE_METRICS", true),
        }
    }

    /// Resolve the namespace a secure key lives in
    ///
    /// An empty declared namespace means the configured default.
    pub fn effective_namespace<'a>(&'a self, declared: &'a str) -> &'a str {
        if declared.is_empty() {
            &self.default_namespace
        } else {
            declared
        }
    }

    /// Get request timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T
where
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read environment variable, treating an empty value as unset
fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.host, "http://localhost:11015");
        assert_eq!(config.default_namespace, "default");
        assert!(config.access_token.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_effective_namespace() {
        let config = ControllerConfig {
            default_namespace: "platform".to_string(),
            ..ControllerConfig::default()
        };
        assert_eq!(config.effective_namespace(""), "platform");
        assert_eq!(config.effective_namespace("analytics"), "analytics");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ControllerConfig {
            access_token: Some("super-secret-token".to_string()),
            ..ControllerConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
