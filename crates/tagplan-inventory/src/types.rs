//! Wire shapes of the provider's inventory exports.
//!
//! These mirror the JSON printed by the AWS CLI for
//! `resource-explorer-2 list-views`, `resource-explorer-2 list-resources`,
//! `resourcegroupstaggingapi get-resources` and `sts get-caller-identity`.

use serde::Deserialize;
use tagplan_core::{Resource, Tag};

/// A file holding either one page or several pages of output.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Pages<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Pages<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Pages::Many(pages) => pages,
            Pages::One(page) => vec![page],
        }
    }
}

/// One page of `list-views`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListViewsPage {
    #[serde(default)]
    pub views: Vec<String>,
}

/// One resource of `list-resources`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExplorerResource {
    #[serde(default)]
    pub arn: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub resource_type: String,
}

impl From<ExplorerResource> for Resource {
    fn from(resource: ExplorerResource) -> Self {
        let listed = Resource::new(resource.arn, resource.service, resource.resource_type);
        match resource.region.filter(|r| !r.is_empty()) {
            Some(region) => listed.with_region(region),
            None => listed,
        }
    }
}

/// One page of `list-resources`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourcesPage {
    #[serde(default)]
    pub resources: Vec<ExplorerResource>,
}

/// Tags of one resource in `get-resources`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagMapping {
    #[serde(rename = "ResourceARN")]
    pub resource_arn: String,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<Tag>,
}

/// One page of `get-resources`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetResourcesPage {
    #[serde(rename = "ResourceTagMappingList", default)]
    pub mappings: Vec<TagMapping>,
}

/// Output of `get-caller-identity`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_and_page_list() {
        let one: Pages<ListViewsPage> =
            serde_json::from_str(r#"{"Views": ["arn:a"], "NextToken": "x"}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: Pages<ListViewsPage> =
            serde_json::from_str(r#"[{"Views": ["arn:a"]}, {"Views": ["arn:b"]}]"#).unwrap();
        let pages = many.into_vec();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].views, vec!["arn:b"]);
    }

    #[test]
    fn test_explorer_resource_into_resource() {
        let page: ListResourcesPage = serde_json::from_str(
            r#"{"Resources": [{
                "Arn": "arn:aws:ec2:us-west-2:111:instance/i-1",
                "LastReportedAt": "2024-01-01T00:00:00Z",
                "OwningAccountId": "111",
                "Properties": [],
                "Region": "us-west-2",
                "ResourceType": "ec2:instance",
                "Service": "ec2"
            }]}"#,
        )
        .unwrap();
        let resource: Resource = page.resources.into_iter().next().unwrap().into();
        assert_eq!(resource.service, "ec2");
        assert_eq!(resource.resource_type, "ec2:instance");
        assert_eq!(resource.region.as_deref(), Some("us-west-2"));
        assert!(resource.tags.is_empty());
    }

    #[test]
    fn test_tag_mapping() {
        let page: GetResourcesPage = serde_json::from_str(
            r#"{"PaginationToken": "", "ResourceTagMappingList": [
                {"ResourceARN": "arn:aws:s3:::b", "Tags": [{"Key": "Name", "Value": "b"}]},
                {"ResourceARN": "arn:aws:s3:::c"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(page.mappings.len(), 2);
        assert_eq!(page.mappings[0].tags[0], Tag::new("Name", "b"));
        assert!(page.mappings[1].tags.is_empty());
    }
}
