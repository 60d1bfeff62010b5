//! In-memory inventory

use crate::error::{Error, Result};
use crate::view::find_view;
use crate::Inventory;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tagplan_core::{Resource, Tag};

/// Inventory held entirely in memory.
///
/// Tag lookups for regions marked with [`failing_region`](Self::failing_region)
/// return [`Error::BatchFailed`].
#[derive(Debug, Default)]
pub struct MemoryInventory {
    account: Option<String>,
    views: Vec<String>,
    resources: Vec<Resource>,
    tags: HashMap<String, Vec<Tag>>,
    failing_regions: HashSet<String>,
    max_batch_seen: AtomicUsize,
}

impl MemoryInventory {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            ..Self::default()
        }
    }

    pub fn with_view(mut self, view_arn: impl Into<String>) -> Self {
        self.views.push(view_arn.into());
        self
    }

    /// Add a resource. Its tags are served by `fetch_tags`, not by
    /// `list_resources`.
    pub fn with_resource(mut self, resource: Resource, tags: Vec<Tag>) -> Self {
        if !tags.is_empty() {
            self.tags.insert(resource.identifier.clone(), tags);
        }
        self.resources.push(Resource {
            tags: Vec::new(),
            ..resource
        });
        self
    }

    pub fn failing_region(mut self, region: impl Into<String>) -> Self {
        self.failing_regions.insert(region.into());
        self
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Largest batch passed to `fetch_tags` so far.
    pub fn max_batch_seen(&self) -> usize {
        self.max_batch_seen.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl Inventory for MemoryInventory {
    async fn resolve_view(&self, _region: &str, view_name: &str) -> Result<Option<String>> {
        Ok(find_view(&self.views, view_name).map(str::to_string))
    }

    async fn list_resources(&self, _region: &str, _view: &str) -> Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }

    async fn fetch_tags(
        &self,
        identifiers: &[String],
        region: &str,
    ) -> Result<HashMap<String, Vec<Tag>>> {
        self.max_batch_seen
            .fetch_max(identifiers.len(), Ordering::Relaxed);

        if self.failing_regions.contains(region) {
            return Err(Error::BatchFailed {
                region: region.to_string(),
                count: identifiers.len(),
                message: "simulated failure".to_string(),
            });
        }

        Ok(identifiers
            .iter()
            .filter_map(|id| self.tags.get(id).map(|tags| (id.clone(), tags.clone())))
            .collect())
    }

    async fn account_id(&self, _region: &str) -> Result<Option<String>> {
        Ok(self.account.clone())
    }
}
