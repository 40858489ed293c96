//! # Paths
//!
//! Address construction for the secure key REST surface.
//!
//! ```text
//! PUT    {host}/v3/namespaces/{namespace}/securekeys/{name}
//! DELETE {host}/v3/namespaces/{namespace}/securekeys/{name}
//! GET    {host}/v3/namespaces/{namespace}/securekeys
//! ```
//!
//! Segments are joined verbatim. They are not percent-encoded, so a namespace
//! or name containing `/` changes the address; callers are trusted here.

use crate::constants::{API_VERSION_SEGMENT, NAMESPACES_SEGMENT, SECURE_KEYS_SEGMENT};

/// Join a base URL with path segments using exactly one `/` between parts.
///
/// Leading and trailing separators on the base and on every segment are
/// ignored, and empty segments contribute nothing. Separators inside a
/// segment (`"v3/namespaces"`) are kept as written.
pub fn url_join<S: AsRef<str>>(base: &str, segments: &[S]) -> String {
    let mut address = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.as_ref().trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        address.push('/');
        address.push_str(segment);
    }
    address
}

/// Builder for secure key addresses
///
/// # Example
///
/// ```rust
/// use securekey_controller::paths::SecureKeyPath;
///
/// let path = SecureKeyPath::new("http://localhost:11015", "default").key("db-password");
/// assert_eq!(
///     path,
///     "http://localhost:11015/v3/namespaces/default/securekeys/db-password"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SecureKeyPath<'a> {
    host: &'a str,
    namespace: &'a str,
}

impl<'a> SecureKeyPath<'a> {
    pub fn new(host: &'a str, namespace: &'a str) -> Self {
        Self { host, namespace }
    }

    /// Namespace-level listing address (no key name)
    #[must_use]
    pub fn collection(&self) -> String {
        url_join(
            self.host,
            &[
                API_VERSION_SEGMENT,
                NAMESPACES_SEGMENT,
                self.namespace,
                SECURE_KEYS_SEGMENT,
            ],
        )
    }

    /// Per-key address, shared by create and delete
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        url_join(&self.collection(), &[name])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_single_separator() {
        let cases = [
            ("http://host", vec!["a", "b"]),
            ("http://host/", vec!["/a", "b/"]),
            ("http://host//", vec!["//a//", "/b"]),
            ("http://host", vec!["a/", "/b"]),
        ];
        for (base, segments) in cases {
            assert_eq!(
                url_join(base, &segments),
                "http://host/a/b",
                "base {base:?} with {segments:?}"
            );
        }
    }

    #[test]
    fn test_url_join_keeps_inner_separators() {
        assert_eq!(
            url_join("http://host:11015", &["/v3/namespaces", "ns", "/securekeys"]),
            "http://host:11015/v3/namespaces/ns/securekeys"
        );
    }

    #[test]
    fn test_url_join_skips_empty_segments() {
        assert_eq!(url_join("http://host", &["", "a", "/", "b"]), "http://host/a/b");
        assert_eq!(url_join::<&str>("http://host/", &[]), "http://host");
    }

    #[test]
    fn test_url_join_does_not_encode() {
        assert_eq!(
            url_join("http://host", &["key with space", "ü"]),
            "http://host/key with space/ü"
        );
    }

    #[test]
    fn test_collection_and_key_paths() {
        let path = SecureKeyPath::new("http://localhost:11015/", "analytics");
        assert_eq!(
            path.collection(),
            "http://localhost:11015/v3/namespaces/analytics/securekeys"
        );
        assert_eq!(
            path.key("token"),
            "http://localhost:11015/v3/namespaces/analytics/securekeys/token"
        );
    }
}
