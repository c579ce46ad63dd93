//! EC2 tag conversions and tag-update calls

use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::types::{ResourceType, Tag, TagSpecification};
use log::debug;

use stratus_core::provider::{ProviderError, ProviderResult};
use stratus_core::tags::{KeyValueTags, TagDiff};

/// Convert EC2 tags to a key-value tag set; incomplete tags are skipped
pub fn tags_from_ec2(tags: &[Tag]) -> KeyValueTags {
    tags.iter()
        .filter_map(|tag| match (tag.key(), tag.value()) {
            (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
}

/// Convert a key-value tag set to EC2 tags
pub fn ec2_tags(tags: &KeyValueTags) -> Vec<Tag> {
    tags.iter()
        .map(|(k, v)| Tag::builder().key(k).value(v).build())
        .collect()
}

/// Tag specification for tagging an attachment at creation
pub fn tag_specification(tags: &KeyValueTags) -> TagSpecification {
    TagSpecification::builder()
        .resource_type(ResourceType::TransitGatewayAttachment)
        .set_tags(Some(ec2_tags(tags)))
        .build()
}

/// Apply a tag update to a resource
///
/// Issues exactly the diffed calls: DeleteTags for removed keys, CreateTags
/// for added and changed pairs. Nothing is sent when the diff is empty.
pub async fn update_tags(
    client: &Ec2Client,
    identifier: &str,
    old: &KeyValueTags,
    new: &KeyValueTags,
) -> ProviderResult<()> {
    let diff = TagDiff::between(old, new);

    if !diff.remove.is_empty() {
        debug!("removing {} tags from {}", diff.remove.len(), identifier);

        let removals: Vec<Tag> = diff
            .remove
            .iter()
            .map(|key| Tag::builder().key(key).build())
            .collect();

        client
            .delete_tags()
            .resources(identifier)
            .set_tags(Some(removals))
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(format!("Failed to remove tags from {}: {:?}", identifier, e))
            })?;
    }

    if !diff.create.is_empty() {
        debug!("setting {} tags on {}", diff.create.len(), identifier);

        client
            .create_tags()
            .resources(identifier)
            .set_tags(Some(ec2_tags(&diff.create)))
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(format!("Failed to set tags on {}: {:?}", identifier, e))
            })?;
    }

    Ok(())
}
