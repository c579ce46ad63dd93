//! Transit gateway resource schema definitions

use stratus_core::resource::Value;
use stratus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Tunnel protocol used when none is configured
pub const DEFAULT_PROTOCOL: &str = "gre";

/// Tunnel protocol type for Connect attachments
pub fn protocol() -> AttributeType {
    AttributeType::Enum(vec![DEFAULT_PROTOCOL.to_string()])
}

/// Returns the schema for a Transit Gateway Connect attachment
pub fn transit_gateway_connect_attachment_schema() -> ResourceSchema {
    ResourceSchema::new("transit_gateway_connect_attachment")
        .with_description("An AWS Transit Gateway Connect attachment")
        .attribute(
            AttributeSchema::new("transit_gateway_id", types::transit_gateway_id())
                .required()
                .with_description("ID of the owning transit gateway"),
        )
        .attribute(
            AttributeSchema::new("transport_attachment_id", types::attachment_id())
                .required()
                .with_description("ID of the transport attachment carrying the Connect tunnel"),
        )
        .attribute(
            AttributeSchema::new("protocol", protocol())
                .with_default(Value::String(DEFAULT_PROTOCOL.to_string()))
                .with_description("Tunnel protocol"),
        )
        .attribute(
            AttributeSchema::new("tags", AttributeType::Map(Box::new(AttributeType::String)))
                .with_description("Tags applied to the attachment"),
        )
        .attribute(
            AttributeSchema::new("state", AttributeType::String)
                .computed()
                .with_description("Lifecycle state of the attachment"),
        )
        .attribute(
            AttributeSchema::new("creation_time", AttributeType::String)
                .computed()
                .with_description("Creation timestamp"),
        )
        .attribute(
            AttributeSchema::new("transit_gateway_owner_id", AttributeType::String)
                .computed()
                .with_description("Account that owns the transit gateway"),
        )
        .attribute(
            AttributeSchema::new("resource_owner_id", AttributeType::String)
                .computed()
                .with_description("Account that owns the transport attachment"),
        )
        .attribute(
            AttributeSchema::new("resource_id", AttributeType::String)
                .computed()
                .with_description("ID of the resource behind the transport attachment"),
        )
        .attribute(
            AttributeSchema::new(
                "association",
                AttributeType::Map(Box::new(AttributeType::String)),
            )
            .computed()
            .with_description("Route table association of the attachment"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_attrs() -> HashMap<String, Value> {
        let mut attrs = HashMap::new();
        attrs.insert(
            "transit_gateway_id".to_string(),
            Value::String("tgw-0123456789abcdef0".to_string()),
        );
        attrs.insert(
            "transport_attachment_id".to_string(),
            Value::String("tgw-attach-0123456789abcdef0".to_string()),
        );
        attrs
    }

    #[test]
    fn valid_attachment() {
        let schema = transit_gateway_connect_attachment_schema();
        let mut attrs = valid_attrs();
        attrs.insert(
            "protocol".to_string(),
            Value::String("gre".to_string()),
        );

        let mut tags = HashMap::new();
        tags.insert("Name".to_string(), Value::String("edge".to_string()));
        attrs.insert("tags".to_string(), Value::Map(tags));

        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn protocol_defaults_when_omitted() {
        let schema = transit_gateway_connect_attachment_schema();
        assert!(schema.validate(&valid_attrs()).is_ok());
    }

    #[test]
    fn attachment_missing_required() {
        let schema = transit_gateway_connect_attachment_schema();
        let mut attrs = valid_attrs();
        attrs.remove("transport_attachment_id");

        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn invalid_protocol() {
        let schema = transit_gateway_connect_attachment_schema();
        let mut attrs = valid_attrs();
        attrs.insert(
            "protocol".to_string(),
            Value::String("vxlan".to_string()),
        );

        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn computed_state_not_configurable() {
        let schema = transit_gateway_connect_attachment_schema();
        let mut attrs = valid_attrs();
        attrs.insert(
            "state".to_string(),
            Value::String("available".to_string()),
        );

        assert!(schema.validate(&attrs).is_err());
    }

    #[test]
    fn all_schemas_lists_the_attachment() {
        let schemas = super::super::all_schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(
            schemas[0].resource_type,
            "transit_gateway_connect_attachment"
        );
    }
}
