//! Stratus AWS Provider
//!
//! AWS EC2 Provider implementation for transit gateway Connect attachments.
//!
//! ## Module Structure
//!
//! - `resources` - Resource type definitions exposed to the host engine
//! - `provider` - AwsProvider implementation
//! - `schemas` - Resource schemas
//! - `tags` - EC2 tag conversions and tag-update calls

pub mod provider;
pub mod resources;
pub mod schemas;
pub mod tags;

// Re-export main types
pub use provider::AwsProvider;
pub use resources::TRANSIT_GATEWAY_CONNECT_ATTACHMENT;

use stratus_core::provider::{BoxFuture, Provider, ProviderError, ProviderResult, ResourceType};
use stratus_core::resource::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for AwsProvider {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            match id.resource_type.as_str() {
                TRANSIT_GATEWAY_CONNECT_ATTACHMENT => {
                    self.read_connect_attachment(&id.name, identifier.as_deref())
                        .await
                }
                _ => Err(ProviderError::new(format!(
                    "Unknown resource type: {}",
                    id.resource_type
                ))
                .for_resource(id.clone())),
            }
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move {
            match resource.id.resource_type.as_str() {
                TRANSIT_GATEWAY_CONNECT_ATTACHMENT => {
                    self.create_connect_attachment(resource).await
                }
                _ => Err(ProviderError::new(format!(
                    "Unknown resource type: {}",
                    resource.id.resource_type
                ))
                .for_resource(resource.id.clone())),
            }
        })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move {
            match id.resource_type.as_str() {
                TRANSIT_GATEWAY_CONNECT_ATTACHMENT => {
                    self.update_connect_attachment(id, &identifier, &from, to)
                        .await
                }
                _ => Err(ProviderError::new(format!(
                    "Unknown resource type: {}",
                    id.resource_type
                ))
                .for_resource(id.clone())),
            }
        })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move {
            match id.resource_type.as_str() {
                TRANSIT_GATEWAY_CONNECT_ATTACHMENT => {
                    self.delete_connect_attachment(&id, &identifier).await
                }
                _ => Err(ProviderError::new(format!(
                    "Unknown resource type: {}",
                    id.resource_type
                ))
                .for_resource(id.clone())),
            }
        })
    }
}
