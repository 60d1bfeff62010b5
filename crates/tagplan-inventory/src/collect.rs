//! Batched tag lookup

use crate::error::Result;
use crate::pacing::{RequestPacer, DEFAULT_REQUESTS_PER_SECOND};
use crate::Inventory;
use serde::Serialize;
use std::collections::HashMap;
use tagplan_core::{region_of, AuditLog, Resource, Tag};

/// Largest number of identifiers sent in one tag lookup.
pub const MAX_TAG_BATCH: usize = 100;

/// Region used for tag lookups of global resources.
pub const GLOBAL_TAG_REGION: &str = "us-east-1";

/// Counters from one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectStats {
    pub batches: usize,
    pub failed_batches: usize,
    pub resources_without_tags: usize,
}

/// Fetches tags for a resource list in paced, region-grouped batches.
#[derive(Debug, Clone)]
pub struct TagCollector {
    batch_size: usize,
    pacer: Option<RequestPacer>,
}

impl TagCollector {
    /// Batches of 100, paced at [`DEFAULT_REQUESTS_PER_SECOND`].
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(DEFAULT_REQUESTS_PER_SECOND)
    }

    /// Batches of 100 at a custom pace.
    pub fn with_rate_limit(requests_per_second: u32) -> Result<Self> {
        Ok(Self {
            batch_size: MAX_TAG_BATCH,
            pacer: Some(RequestPacer::per_second(requests_per_second)?),
        })
    }

    /// No pacing. Meant for local sources and tests.
    pub fn without_pacing() -> Self {
        Self {
            batch_size: MAX_TAG_BATCH,
            pacer: None,
        }
    }

    /// Clamp the batch size to `1..=MAX_TAG_BATCH`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_TAG_BATCH);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Replace every resource's tags with the ones the inventory reports.
    ///
    /// A failed batch is logged and its resources end up with no tags; the
    /// remaining batches still run.
    pub async fn collect<I: Inventory + ?Sized>(
        &self,
        inventory: &I,
        resources: &mut [Resource],
        audit: &mut AuditLog,
    ) -> CollectStats {
        let mut stats = CollectStats::default();
        let mut found: HashMap<String, Vec<Tag>> = HashMap::new();

        for (region, identifiers) in group_by_tag_region(resources) {
            for batch in identifiers.chunks(self.batch_size) {
                if let Some(pacer) = &self.pacer {
                    pacer.wait().await;
                }
                stats.batches += 1;

                match inventory.fetch_tags(batch, &region).await {
                    Ok(tags) => {
                        tracing::debug!(
                            region = %region,
                            requested = batch.len(),
                            returned = tags.len(),
                            "Fetched tag batch"
                        );
                        found.extend(tags);
                    }
                    Err(e) => {
                        stats.failed_batches += 1;
                        audit.warn(format!(
                            "Could not get tags for batch of {} resources in {}: {}",
                            batch.len(),
                            region,
                            e
                        ));
                    }
                }
            }
        }

        for resource in resources.iter_mut() {
            resource.tags = found.get(&resource.identifier).cloned().unwrap_or_default();
            if resource.tags.is_empty() {
                stats.resources_without_tags += 1;
            }
        }

        stats
    }
}

/// Collect tags with the default batch size and pace.
pub async fn collect_tags<I: Inventory + ?Sized>(
    inventory: &I,
    resources: &mut [Resource],
    audit: &mut AuditLog,
) -> CollectStats {
    let collector = TagCollector::new().unwrap_or_else(|_| TagCollector::without_pacing());
    collector.collect(inventory, resources, audit).await
}

/// Region a resource's tags are looked up in: the region the inventory
/// listed it in, else the identifier's region field. Global resources go to
/// [`GLOBAL_TAG_REGION`].
fn tag_region(resource: &Resource) -> &str {
    resource
        .region
        .as_deref()
        .filter(|r| !r.is_empty())
        .or_else(|| region_of(&resource.identifier))
        .filter(|r| *r != "global")
        .unwrap_or(GLOBAL_TAG_REGION)
}

/// Identifiers grouped by tag lookup region, in first-seen order.
fn group_by_tag_region(resources: &[Resource]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for resource in resources {
        let region = tag_region(resource);
        match groups.iter_mut().find(|(r, _)| r.as_str() == region) {
            Some((_, ids)) => ids.push(resource.identifier.clone()),
            None => groups.push((region.to_string(), vec![resource.identifier.clone()])),
        }
    }
    groups
}
