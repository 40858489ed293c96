//! # Response Types
//!
//! JSON payloads returned by the secure key endpoints.

use serde::Deserialize;

/// One entry of `GET /v3/namespaces/{namespace}/securekeys`
///
/// Only the name is read. The listing never includes the stored value, and
/// any other metadata the backend adds is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SecureKeyRecord {
    pub name: String,
}

/// Decode a listing body into records
pub(crate) fn parse_listing(body: &[u8]) -> serde_json::Result<Vec<SecureKeyRecord>> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_ignores_extra_fields() {
        let body = br#"[{"name":"a","description":"first","properties":{}},{"name":"b"}]"#;
        let records = parse_listing(body).unwrap();
        assert_eq!(
            records,
            vec![
                SecureKeyRecord { name: "a".to_string() },
                SecureKeyRecord { name: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_parse_listing_rejects_wrong_shapes() {
        for body in ["not-json", "{}", "null", r#"[{"id":"a"}]"#, ""] {
            assert!(
                parse_listing(body.as_bytes()).is_err(),
                "{body:?} should not decode"
            );
        }
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_listing(b"[]").unwrap().is_empty());
    }
}
