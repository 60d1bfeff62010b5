//! Inventory backed by exported JSON files
//!
//! Layout of a snapshot directory:
//!
//! ```text
//! inventory/
//! ├── views.json       list-views output (one page or an array of pages)
//! ├── resources.json   list-resources output for the view
//! ├── tags.json        get-resources output
//! └── identity.json    get-caller-identity output (optional)
//! ```

use crate::error::{Error, Result};
use crate::types::{CallerIdentity, GetResourcesPage, ListResourcesPage, ListViewsPage, Pages};
use crate::view::find_view;
use crate::Inventory;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tagplan_core::{Arn, Resource, Tag};
use tokio::sync::OnceCell;

const VIEWS_FILE: &str = "views.json";
const RESOURCES_FILE: &str = "resources.json";
const TAGS_FILE: &str = "tags.json";
const IDENTITY_FILE: &str = "identity.json";

/// Reads inventory data from a snapshot directory.
///
/// Each file is read at most once; later calls are served from memory.
#[derive(Debug)]
pub struct SnapshotInventory {
    root: PathBuf,
    views: OnceCell<Vec<String>>,
    tags: OnceCell<HashMap<String, Vec<Tag>>>,
}

impl SnapshotInventory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            views: OnceCell::new(),
            tags: OnceCell::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn views(&self) -> Result<&Vec<String>> {
        self.views
            .get_or_try_init(|| async {
                let pages: Pages<ListViewsPage> = read_json(&self.root.join(VIEWS_FILE)).await?;
                Ok::<_, Error>(pages.into_vec().into_iter().flat_map(|p| p.views).collect())
            })
            .await
    }

    async fn tags(&self) -> Result<&HashMap<String, Vec<Tag>>> {
        self.tags
            .get_or_try_init(|| async {
                let pages: Pages<GetResourcesPage> = read_json(&self.root.join(TAGS_FILE)).await?;
                let mut tags = HashMap::new();
                for mapping in pages.into_vec().into_iter().flat_map(|p| p.mappings) {
                    tags.insert(mapping.resource_arn, mapping.tags);
                }
                tracing::debug!(count = tags.len(), "Loaded tag snapshot");
                Ok::<_, Error>(tags)
            })
            .await
    }
}

#[async_trait::async_trait]
impl Inventory for SnapshotInventory {
    async fn resolve_view(&self, region: &str, view_name: &str) -> Result<Option<String>> {
        let views = self.views().await?;
        tracing::debug!(region = %region, views = views.len(), "Searching views");
        Ok(find_view(views, view_name).map(str::to_string))
    }

    async fn list_resources(&self, region: &str, view: &str) -> Result<Vec<Resource>> {
        let pages: Pages<ListResourcesPage> = read_json(&self.root.join(RESOURCES_FILE)).await?;
        let resources: Vec<Resource> = pages
            .into_vec()
            .into_iter()
            .flat_map(|p| p.resources)
            .map(Resource::from)
            .collect();
        tracing::debug!(
            region = %region,
            view = %view,
            count = resources.len(),
            "Listed resources"
        );
        Ok(resources)
    }

    async fn fetch_tags(
        &self,
        identifiers: &[String],
        _region: &str,
    ) -> Result<HashMap<String, Vec<Tag>>> {
        let tags = self.tags().await?;
        Ok(identifiers
            .iter()
            .filter_map(|id| tags.get(id).map(|t| (id.clone(), t.clone())))
            .collect())
    }

    async fn account_id(&self, _region: &str) -> Result<Option<String>> {
        let identity_path = self.root.join(IDENTITY_FILE);
        if tokio::fs::try_exists(&identity_path)
            .await
            .map_err(|e| Error::io(&identity_path, e))?
        {
            let identity: CallerIdentity = read_json(&identity_path).await?;
            return Ok(Some(identity.account));
        }

        let views = self.views().await?;
        Ok(views.iter().find_map(|view| {
            Arn::parse(view)
                .ok()
                .and_then(|arn| arn.account().map(str::to_string))
        }))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_views_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let inventory = SnapshotInventory::new(dir.path());
        let result = inventory.resolve_view("us-west-2", "v").await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_bad_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(RESOURCES_FILE), "{not json").unwrap();
        let inventory = SnapshotInventory::new(dir.path());
        let result = inventory.list_resources("us-west-2", "v").await;
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[tokio::test]
    async fn test_account_falls_back_to_view_arn() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(VIEWS_FILE),
            r#"{"Views": ["arn:aws:resource-explorer-2:us-west-2:222233334444:view/all/1"]}"#,
        )
        .unwrap();
        let inventory = SnapshotInventory::new(dir.path());
        assert_eq!(
            inventory.account_id("us-west-2").await.unwrap().as_deref(),
            Some("222233334444")
        );

        std::fs::write(dir.path().join(IDENTITY_FILE), r#"{"Account": "999"}"#).unwrap();
        assert_eq!(
            inventory.account_id("us-west-2").await.unwrap().as_deref(),
            Some("999")
        );
    }
}
