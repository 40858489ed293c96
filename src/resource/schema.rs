//! # Resource Schema
//!
//! Attribute metadata published for orchestrators.
//!
//! The value types in this crate carry no mutability flags. Whether a changed
//! attribute can be applied in place or forces a destroy + recreate is
//! described here, so a planner can make that call from a diff.

use crate::constants::DEFAULT_NAMESPACE;

/// Type of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Map,
}

impl AttributeType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Map => "map",
        }
    }
}

/// Metadata for one declarative attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub kind: AttributeType,
    pub required: bool,
    /// A change to this attribute can only be realized by replacement
    pub force_new: bool,
    /// Value used when the attribute is not declared
    pub default: Option<&'static str>,
    pub description: &'static str,
}

/// Attribute metadata for a resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    pub resource_type: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up an attribute by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of the attributes that must be declared
    pub fn required_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name)
    }

    /// Whether applying these changed attributes needs destroy + recreate
    ///
    /// Unknown attribute names are treated as replacement-forcing.
    #[must_use]
    pub fn requires_replacement(&self, changed: &[&str]) -> bool {
        changed
            .iter()
            .any(|name| self.attribute(name).is_none_or(|a| a.force_new))
    }
}

/// Schema for the `securekey` resource
///
/// Every attribute is write-once: secure keys have no update path.
#[must_use]
pub fn secure_key_schema() -> ResourceSchema {
    ResourceSchema {
        resource_type: "securekey",
        attributes: vec![
            AttributeSchema {
                name: "data",
                kind: AttributeType::String,
                required: true,
                force_new: true,
                default: None,
                description: "The secret to be secured.",
            },
            AttributeSchema {
                name: "description",
                kind: AttributeType::String,
                required: false,
                force_new: true,
                default: None,
                description: "The description of the secure key.",
            },
            AttributeSchema {
                name: "namespace",
                kind: AttributeType::String,
                required: false,
                force_new: true,
                default: Some(DEFAULT_NAMESPACE),
                description: "The name of the namespace in which this resource belongs. \
                              If not provided, the default namespace is used.",
            },
            AttributeSchema {
                name: "name",
                kind: AttributeType::String,
                required: true,
                force_new: true,
                default: None,
                description: "The name of the secure key. \
                              This will be used as the unique identifier in the API.",
            },
            AttributeSchema {
                name: "properties",
                kind: AttributeType::Map,
                required: false,
                force_new: true,
                default: None,
                description: "Additional key/value pairs that can be attached to the secure key.",
            },
        ],
    }
}
