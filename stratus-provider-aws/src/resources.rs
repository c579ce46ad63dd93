//! Resource type definitions exposed to the host engine

use stratus_core::provider::ResourceType;
use stratus_core::schema::ResourceSchema;

use crate::schemas;

/// Resource type name of the transit gateway Connect attachment
pub const TRANSIT_GATEWAY_CONNECT_ATTACHMENT: &str = "transit_gateway_connect_attachment";

/// Transit Gateway Connect attachment resource type
pub struct TransitGatewayConnectAttachmentType;

impl ResourceType for TransitGatewayConnectAttachmentType {
    fn name(&self) -> &'static str {
        TRANSIT_GATEWAY_CONNECT_ATTACHMENT
    }

    fn schema(&self) -> ResourceSchema {
        schemas::transit_gateway_connect_attachment_schema()
    }
}

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![Box::new(TransitGatewayConnectAttachmentType)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_type_name() {
        let attachment_type = TransitGatewayConnectAttachmentType;
        assert_eq!(attachment_type.name(), "transit_gateway_connect_attachment");
    }

    #[test]
    fn attachment_type_exposes_schema_map() {
        let schema = TransitGatewayConnectAttachmentType.schema();
        assert_eq!(schema.resource_type, "transit_gateway_connect_attachment");
        assert!(schema.attributes.contains_key("transit_gateway_id"));
        assert!(schema.attributes["state"].computed);
    }

    #[test]
    fn registry_lists_the_attachment_type() {
        let types = resource_types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name(), TRANSIT_GATEWAY_CONNECT_ATTACHMENT);
    }
}
