//! Resource inventory and tag lookup for tagplan
//!
//! The planner needs three things from the outside world: which view to
//! query, which resources it lists, and what tags those resources carry.
//! [`Inventory`] is that seam. Two implementations ship here:
//!
//! - [`SnapshotInventory`]: reads JSON exports produced by the provider CLI
//! - [`MemoryInventory`]: in-memory, for tests and embedding
//!
//! [`TagCollector`] fetches tags in batches of at most 100 identifiers,
//! paces calls, and keeps going when a batch fails.
//!
//! # Example
//!
//! ```no_run
//! use tagplan_core::AuditLog;
//! use tagplan_inventory::{Inventory, SnapshotInventory, TagCollector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let inventory = SnapshotInventory::new("./inventory");
//!     let view = tagplan_inventory::require_view(&inventory, "us-west-2", "all-resources-with-tags").await?;
//!
//!     let mut resources = inventory.list_resources("us-west-2", &view).await?;
//!     let mut audit = AuditLog::new();
//!     TagCollector::new()?.collect(&inventory, &mut resources, &mut audit).await;
//!
//!     println!("{} resources", resources.len());
//!     Ok(())
//! }
//! ```

mod collect;
mod error;
mod memory;
mod pacing;
mod snapshot;
pub mod types;
mod view;

pub use collect::{collect_tags, CollectStats, TagCollector, GLOBAL_TAG_REGION, MAX_TAG_BATCH};
pub use error::{Error, Result};
pub use memory::MemoryInventory;
pub use pacing::{RequestPacer, DEFAULT_REQUESTS_PER_SECOND};
pub use snapshot::SnapshotInventory;
pub use view::{find_view, view_name_from_arn};

use std::collections::HashMap;
use tagplan_core::{Resource, Tag};

/// Source of resources and their tags.
#[async_trait::async_trait]
pub trait Inventory: Send + Sync {
    /// Identifier of the view named `view_name`, if it exists.
    async fn resolve_view(&self, region: &str, view_name: &str) -> Result<Option<String>>;

    /// All resources visible through `view`, without tags.
    async fn list_resources(&self, region: &str, view: &str) -> Result<Vec<Resource>>;

    /// Tags for up to [`MAX_TAG_BATCH`] identifiers.
    ///
    /// Identifiers the provider does not know are absent from the result.
    async fn fetch_tags(
        &self,
        identifiers: &[String],
        region: &str,
    ) -> Result<HashMap<String, Vec<Tag>>>;

    /// Account the inventory belongs to, when known.
    async fn account_id(&self, region: &str) -> Result<Option<String>>;
}

/// Resolve `view_name` or fail with [`Error::ViewNotFound`].
pub async fn require_view<I: Inventory + ?Sized>(
    inventory: &I,
    region: &str,
    view_name: &str,
) -> Result<String> {
    inventory
        .resolve_view(region, view_name)
        .await?
        .ok_or_else(|| Error::ViewNotFound {
            view: view_name.to_string(),
            region: region.to_string(),
        })
}
