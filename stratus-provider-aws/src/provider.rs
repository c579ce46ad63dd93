//! AWS Provider implementation
//!
//! Issues EC2 API calls for transit gateway Connect attachments and
//! reconciles the responses back into resource state.

use std::collections::HashMap;

use aws_config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{CreateTransitGatewayConnectRequestOptions, ProtocolValue, TransitGatewayConnect};
use aws_smithy_types::date_time::Format;
use log::{debug, warn};

use stratus_core::provider::{ProviderError, ProviderResult};
use stratus_core::resource::{Resource, ResourceId, State, Value};
use stratus_core::tags::{IgnoreTagsConfig, KeyValueTags};

use crate::resources::TRANSIT_GATEWAY_CONNECT_ATTACHMENT;
use crate::schemas::transit_gateway::DEFAULT_PROTOCOL;
use crate::tags::{tag_specification, tags_from_ec2, update_tags};

/// Error code for a Connect attachment that no longer exists
pub const CONNECT_NOT_FOUND: &str = "InvalidTransitGatewayConnect.NotFound";

/// Error code for an attachment ID that no longer resolves
pub const ATTACHMENT_ID_NOT_FOUND: &str = "InvalidTransitGatewayAttachmentID.NotFound";

/// Extract the EC2 API error code from an SDK error, if any
fn error_code<E, R>(err: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(|e| e.code())
}

/// AWS Provider
pub struct AwsProvider {
    ec2_client: Ec2Client,
    region: String,
    ignore_tags: IgnoreTagsConfig,
}

impl AwsProvider {
    /// Create a new AWS Provider for the specified region
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            ec2_client: Ec2Client::new(&config),
            region: region.to_string(),
            ignore_tags: IgnoreTagsConfig::default(),
        }
    }

    /// Create with a specific client (for testing)
    pub fn with_client(ec2_client: Ec2Client, region: String) -> Self {
        Self {
            ec2_client,
            region,
            ignore_tags: IgnoreTagsConfig::default(),
        }
    }

    /// Set the tag ignore rules applied when reading remote tags
    pub fn with_ignore_tags(mut self, ignore_tags: IgnoreTagsConfig) -> Self {
        self.ignore_tags = ignore_tags;
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    // ========== Transit Gateway Connect Attachment Operations ==========

    /// Read a transit gateway Connect attachment by its attachment ID
    ///
    /// An unknown identifier is benign absence, not an error: the returned
    /// state carries no identity and the host drops the resource.
    pub async fn read_connect_attachment(
        &self,
        name: &str,
        identifier: Option<&str>,
    ) -> ProviderResult<State> {
        let id = ResourceId::new(TRANSIT_GATEWAY_CONNECT_ATTACHMENT, name);

        let Some(identifier) = identifier else {
            return Ok(State::not_found(id));
        };

        let output = match self
            .ec2_client
            .describe_transit_gateway_connects()
            .transit_gateway_attachment_ids(identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if error_code(&err) == Some(CONNECT_NOT_FOUND) => {
                warn!(
                    "transit gateway connect attachment {} not found, clearing state",
                    identifier
                );
                return Ok(State::not_found(id));
            }
            Err(err) => {
                return Err(ProviderError::new(format!(
                    "Failed to describe transit gateway connect attachment {}: {:?}",
                    identifier, err
                ))
                .for_resource(id));
            }
        };

        let Some(connect) = output.transit_gateway_connects().first() else {
            warn!(
                "transit gateway connect attachment {} not found, clearing state",
                identifier
            );
            return Ok(State::not_found(id));
        };

        let transit_gateway_id = connect.transit_gateway_id().ok_or_else(|| {
            ProviderError::new(format!(
                "Transit gateway connect attachment {} has no transit gateway ID",
                identifier
            ))
            .for_resource(id.clone())
        })?;

        self.check_transit_gateway(transit_gateway_id)
            .await
            .map_err(|e| e.for_resource(id.clone()))?;

        if connect.options().is_none() {
            return Err(ProviderError::new(format!(
                "Transit gateway connect attachment {} has no options",
                identifier
            ))
            .for_resource(id));
        }

        let attributes = connect_attributes(connect, &self.ignore_tags);

        Ok(State::existing(id, attributes).with_identifier(identifier))
    }

    /// Create a transit gateway Connect attachment
    pub async fn create_connect_attachment(&self, resource: Resource) -> ProviderResult<State> {
        let transit_gateway_id = match resource.attributes.get("transit_gateway_id") {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(ProviderError::new("Transit gateway ID is required")
                    .for_resource(resource.id.clone()));
            }
        };

        let transport_attachment_id = match resource.attributes.get("transport_attachment_id") {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(ProviderError::new("Transport attachment ID is required")
                    .for_resource(resource.id.clone()));
            }
        };

        let protocol = match resource.attributes.get("protocol") {
            Some(Value::String(s)) => s.clone(),
            _ => DEFAULT_PROTOCOL.to_string(),
        };

        let options = CreateTransitGatewayConnectRequestOptions::builder()
            .protocol(ProtocolValue::from(protocol.as_str()))
            .build();

        let tags = KeyValueTags::from_value(resource.attributes.get("tags"));

        debug!(
            "creating transit gateway connect attachment over {}",
            transport_attachment_id
        );

        let mut request = self
            .ec2_client
            .create_transit_gateway_connect()
            .transport_transit_gateway_attachment_id(&transport_attachment_id)
            .options(options);

        if !tags.is_empty() {
            request = request.tag_specifications(tag_specification(&tags));
        }

        let result = request.send().await.map_err(|e| {
            ProviderError::new(format!(
                "Failed to create transit gateway connect attachment: {:?}",
                e
            ))
            .for_resource(resource.id.clone())
        })?;

        let identifier = result
            .transit_gateway_connect()
            .and_then(|c| c.transit_gateway_attachment_id())
            .map(String::from)
            .ok_or_else(|| {
                ProviderError::new("Transit gateway connect attachment created but no ID returned")
                    .for_resource(resource.id.clone())
            })?;

        self.check_transit_gateway(&transit_gateway_id)
            .await
            .map_err(|e| e.for_resource(resource.id.clone()))?;

        self.read_connect_attachment(&resource.id.name, Some(&identifier))
            .await
    }

    /// Update a transit gateway Connect attachment
    ///
    /// Only the tag set can change in place; everything else forces a
    /// replacement, which the host drives as delete + create.
    pub async fn update_connect_attachment(
        &self,
        id: ResourceId,
        identifier: &str,
        from: &State,
        to: Resource,
    ) -> ProviderResult<State> {
        let old = KeyValueTags::from_value(from.attributes.get("tags"));
        let new = KeyValueTags::from_value(to.attributes.get("tags"));

        if old != new {
            update_tags(&self.ec2_client, identifier, &old, &new)
                .await
                .map_err(|e| e.for_resource(id.clone()))?;
        }

        self.read_connect_attachment(&id.name, Some(identifier))
            .await
    }

    /// Delete a transit gateway Connect attachment
    ///
    /// An already-deleted attachment is success.
    pub async fn delete_connect_attachment(
        &self,
        id: &ResourceId,
        identifier: &str,
    ) -> ProviderResult<()> {
        debug!("deleting transit gateway connect attachment {}", identifier);

        match self
            .ec2_client
            .delete_transit_gateway_connect()
            .transit_gateway_attachment_id(identifier)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if error_code(&err) == Some(ATTACHMENT_ID_NOT_FOUND) => {
                debug!(
                    "transit gateway connect attachment {} already deleted",
                    identifier
                );
                Ok(())
            }
            Err(err) => Err(ProviderError::new(format!(
                "Failed to delete transit gateway connect attachment {}: {:?}",
                identifier, err
            ))
            .for_resource(id.clone())),
        }
    }

    /// Describe the owning transit gateway and require its options
    ///
    /// A gateway without options cannot carry Connect attachments.
    async fn check_transit_gateway(&self, transit_gateway_id: &str) -> ProviderResult<()> {
        let result = self
            .ec2_client
            .describe_transit_gateways()
            .transit_gateway_ids(transit_gateway_id)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(format!(
                    "Failed to describe transit gateway {}: {:?}",
                    transit_gateway_id, e
                ))
            })?;

        let gateway = result.transit_gateways().first().ok_or_else(|| {
            ProviderError::new(format!("Transit gateway {} not found", transit_gateway_id))
        })?;

        if gateway.options().is_none() {
            return Err(ProviderError::new(format!(
                "Transit gateway {} has no options",
                transit_gateway_id
            )));
        }

        Ok(())
    }
}

/// Map a described Connect attachment to resource attributes
///
/// Remote tags pass through the AWS-internal and configured ignore rules;
/// an empty tag set is omitted.
fn connect_attributes(
    connect: &TransitGatewayConnect,
    ignore_tags: &IgnoreTagsConfig,
) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();

    if let Some(transit_gateway_id) = connect.transit_gateway_id() {
        attributes.insert(
            "transit_gateway_id".to_string(),
            Value::String(transit_gateway_id.to_string()),
        );
    }

    if let Some(transport) = connect.transport_transit_gateway_attachment_id() {
        attributes.insert(
            "transport_attachment_id".to_string(),
            Value::String(transport.to_string()),
        );
    }

    if let Some(protocol) = connect.options().and_then(|o| o.protocol()) {
        attributes.insert(
            "protocol".to_string(),
            Value::String(protocol.as_str().to_string()),
        );
    }

    if let Some(state) = connect.state() {
        attributes.insert(
            "state".to_string(),
            Value::String(state.as_str().to_string()),
        );
    }

    if let Some(creation_time) = connect.creation_time()
        && let Ok(formatted) = creation_time.fmt(Format::DateTime)
    {
        attributes.insert("creation_time".to_string(), Value::String(formatted));
    }

    let tags = tags_from_ec2(connect.tags())
        .ignore_aws()
        .ignore_config(ignore_tags);
    if !tags.is_empty() {
        attributes.insert("tags".to_string(), tags.to_value());
    }

    attributes
}
