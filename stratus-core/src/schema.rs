//! Schema - Type schemas for resource attributes
//!
//! Providers define a schema per resource type. The host validates declared
//! configuration against it before any API call is made; computed
//! attributes are populated by read and cannot be configured.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List
    List(Box<AttributeType>),
    /// Map
    Map(Box<AttributeType>),
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { validate, .. }, v) => {
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Attribute '{name}' is computed and cannot be configured")]
    NotConfigurable { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Populated by read; rejected in declared configuration
    pub computed: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            computed: false,
            default: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate declared resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        // Check required attributes
        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        // Type check each attribute
        for (name, value) in attributes {
            match self.attributes.get(name) {
                Some(schema) if schema.computed => {
                    errors.push(TypeError::NotConfigurable { name: name.clone() });
                }
                Some(schema) => {
                    if let Err(e) = schema.attr_type.validate(value) {
                        errors.push(e);
                    }
                }
                None => {
                    errors.push(TypeError::UnknownAttribute { name: name.clone() });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Transit gateway ID type (e.g., "tgw-0123456789abcdef0")
    pub fn transit_gateway_id() -> AttributeType {
        AttributeType::Custom {
            name: "TransitGatewayId".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_prefixed_id(s, "tgw-")
                } else {
                    Err("Expected string".to_string())
                }
            },
        }
    }

    /// Transit gateway attachment ID type (e.g., "tgw-attach-0123456789abcdef0")
    pub fn attachment_id() -> AttributeType {
        AttributeType::Custom {
            name: "AttachmentId".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_prefixed_id(s, "tgw-attach-")
                } else {
                    Err("Expected string".to_string())
                }
            },
        }
    }
}

/// Validate an AWS-style prefixed identifier: prefix followed by a
/// non-empty lowercase hex suffix
pub fn validate_prefixed_id(id: &str, prefix: &str) -> Result<(), String> {
    let Some(suffix) = id.strip_prefix(prefix) else {
        return Err(format!("Invalid ID '{}': expected '{}' prefix", id, prefix));
    };

    if suffix.is_empty() {
        return Err(format!("Invalid ID '{}': missing suffix", id));
    }

    if !suffix
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err(format!(
            "Invalid ID '{}': suffix must be lowercase hex",
            id
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::Enum(vec!["gre".to_string()]);
        assert!(t.validate(&Value::String("gre".to_string())).is_ok());
        assert!(t.validate(&Value::String("vxlan".to_string())).is_err());
    }

    #[test]
    fn validate_transit_gateway_id() {
        let t = types::transit_gateway_id();
        assert!(
            t.validate(&Value::String("tgw-0123456789abcdef0".to_string()))
                .is_ok()
        );
        assert!(t.validate(&Value::String("tgw-".to_string())).is_err()); // missing suffix
        assert!(
            t.validate(&Value::String("vpc-0123456789abcdef0".to_string()))
                .is_err()
        ); // wrong prefix
        assert!(
            t.validate(&Value::String("tgw-attach-0123456789abcdef0".to_string()))
                .is_err()
        ); // attachment ID, not a gateway ID
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn validate_attachment_id() {
        let t = types::attachment_id();
        assert!(
            t.validate(&Value::String("tgw-attach-0123456789abcdef0".to_string()))
                .is_ok()
        );
        assert!(
            t.validate(&Value::String("tgw-0123456789abcdef0".to_string()))
                .is_err()
        );
        assert!(
            t.validate(&Value::String("tgw-attach-XYZ".to_string()))
                .is_err()
        );
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("attachment")
            .attribute(AttributeSchema::new("transit_gateway_id", types::transit_gateway_id()).required())
            .attribute(AttributeSchema::new(
                "tags",
                AttributeType::Map(Box::new(AttributeType::String)),
            ));

        let mut attrs = HashMap::new();
        attrs.insert(
            "transit_gateway_id".to_string(),
            Value::String("tgw-0123456789abcdef0".to_string()),
        );

        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("attachment")
            .attribute(AttributeSchema::new("transit_gateway_id", types::transit_gateway_id()).required());

        let attrs = HashMap::new();
        let result = schema.validate(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn default_satisfies_required() {
        let schema = ResourceSchema::new("attachment").attribute(
            AttributeSchema::new("protocol", AttributeType::Enum(vec!["gre".to_string()]))
                .required()
                .with_default(Value::String("gre".to_string())),
        );

        assert!(schema.validate(&HashMap::new()).is_ok());
    }

    #[test]
    fn computed_attribute_rejected_in_config() {
        let schema = ResourceSchema::new("attachment")
            .attribute(AttributeSchema::new("state", AttributeType::String).computed());

        let mut attrs = HashMap::new();
        attrs.insert(
            "state".to_string(),
            Value::String("available".to_string()),
        );

        let errors = schema.validate(&attrs).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, TypeError::NotConfigurable { name } if name == "state"))
        );
    }

    #[test]
    fn unknown_attribute_rejected() {
        let schema = ResourceSchema::new("attachment");

        let mut attrs = HashMap::new();
        attrs.insert("bogus".to_string(), Value::Bool(true));

        let errors = schema.validate(&attrs).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, TypeError::UnknownAttribute { name } if name == "bogus"))
        );
    }
}
