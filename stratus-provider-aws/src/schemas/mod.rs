//! Resource schema definitions

pub mod transit_gateway;

pub use transit_gateway::transit_gateway_connect_attachment_schema;

use stratus_core::schema::ResourceSchema;

/// Returns all schemas exposed by this provider
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![transit_gateway_connect_attachment_schema()]
}
