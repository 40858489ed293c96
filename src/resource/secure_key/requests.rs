//! # Request Types
//!
//! JSON payloads sent to the secure key endpoints.

use serde::Serialize;
use std::collections::BTreeMap;

use super::SecureKeySpec;

/// Request body for creating a secure key
///
/// Used in `PUT /v3/namespaces/{namespace}/securekeys/{name}`. The full key
/// definition is sent; `description` and `properties` are always present,
/// empty when not declared.
#[derive(Debug, Serialize)]
pub struct PutSecureKeyRequest<'a> {
    pub name: &'a str,
    pub data: &'a str,
    pub description: &'a str,
    pub properties: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a SecureKeySpec> for PutSecureKeyRequest<'a> {
    fn from(spec: &'a SecureKeySpec) -> Self {
        Self {
            name: spec.name(),
            data: spec.data(),
            description: spec.description(),
            properties: spec.properties(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_full_key_spec() {
        let spec = SecureKeySpec::builder("api-token", "s3cr3t")
            .description("third-party API token")
            .property("team", "ingest")
            .property("env", "prod")
            .build()
            .unwrap();

        let body = serde_json::to_value(PutSecureKeyRequest::from(&spec)).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "api-token",
                "data": "s3cr3t",
                "description": "third-party API token",
                "properties": {"env": "prod", "team": "ingest"}
            })
        );
    }

    #[test]
    fn test_optional_fields_serialize_empty() {
        let spec = SecureKeySpec::builder("api-token", "s3cr3t").build().unwrap();
        let body = serde_json::to_value(PutSecureKeyRequest::from(&spec)).unwrap();
        assert_eq!(body["description"], "");
        assert_eq!(body["properties"], json!({}));
    }
}
