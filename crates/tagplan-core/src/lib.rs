//! Tagplan Core - shared domain types for tag planning.
//!
//! This crate provides the foundational types used across the tagplan
//! workspace:
//!
//! - [`Resource`] and [`Tag`]: a cloud resource as reported by the inventory
//! - [`PlanRow`]: one `(identifier, tag key, tag value)` instruction in a plan
//! - [`Arn`]: structured view of a `:`-separated resource identifier
//! - [`AuditLog`]: timestamped record of planning decisions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   tagplan-cli   │  (User interface, file output)
//! └────────┬────────┘
//!          │
//!     ┌────┴──────────────────┐
//!     ▼                       ▼
//! ┌─────────────────────┐ ┌───────────────────┐
//! │ tagplan-rule-engine │ │ tagplan-inventory │
//! └────────┬────────────┘ └─────────┬─────────┘
//!          └──────────┬─────────────┘
//!                     ▼
//!          ┌─────────────────┐
//!          │  tagplan-core   │  (This crate - shared types)
//!          └─────────────────┘
//! ```

pub mod arn;
pub mod audit;
pub mod error;
pub mod types;

// Re-export core types for convenience
pub use arn::{region_of, Arn};
pub use audit::{AuditEntry, AuditLevel, AuditLog};
pub use error::{Error, Result};
pub use types::{PlanRow, Resource, Tag, TagAssignment, NAME_TAG_KEY};
