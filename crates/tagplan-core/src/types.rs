//! Core data types for tag planning.

use serde::{Deserialize, Serialize};

/// Tag key whose value is treated as the resource's display name.
pub const NAME_TAG_KEY: &str = "Name";

/// A key/value tag attached to a resource.
///
/// Field names follow the provider's JSON shape (`Key`, `Value`) so tag
/// listings can be deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value", default)]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A cloud resource as reported by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// ARN-like identifier (`arn:partition:service:region:account:resource`)
    pub identifier: String,

    /// Owning service (e.g. `ec2`, `s3`)
    pub service: String,

    /// Resource type, either bare (`instance`) or qualified (`ec2:instance`)
    #[serde(default)]
    pub resource_type: String,

    /// Existing tags in provider order
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Region the inventory listed the resource in (`global` for global
    /// resources), when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Resource {
    /// Create a resource without tags
    pub fn new(
        identifier: impl Into<String>,
        service: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            service: service.into(),
            resource_type: resource_type.into(),
            tags: Vec::new(),
            region: None,
        }
    }

    /// Builder-style helper to record the listed region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builder-style helper to attach tags
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Value of the first tag keyed exactly `Name`, if any.
    pub fn name(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == NAME_TAG_KEY)
            .map(|tag| tag.value.as_str())
    }

    /// Resources without an identifier or a service cannot be planned.
    pub fn is_well_formed(&self) -> bool {
        !self.identifier.is_empty() && !self.service.is_empty()
    }
}

/// A tag a rule wants applied, before it is bound to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagAssignment {
    pub key: String,
    pub value: String,
}

impl TagAssignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One row of a tagging plan.
///
/// Serialized column names match the plan file header:
/// `ResourceARN,TagKey,TagValue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanRow {
    #[serde(rename = "ResourceARN")]
    pub identifier: String,
    #[serde(rename = "TagKey")]
    pub tag_key: String,
    #[serde(rename = "TagValue")]
    pub tag_value: String,
}

impl PlanRow {
    pub fn new(identifier: &str, assignment: &TagAssignment) -> Self {
        Self {
            identifier: identifier.to_string(),
            tag_key: assignment.key.clone(),
            tag_value: assignment.value.clone(),
        }
    }
}
