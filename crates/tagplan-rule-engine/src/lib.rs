//! Tagplan Rule Engine - CSV tagging rules and plan generation
//!
//! This crate turns a table of declarative tagging rules and a resource
//! inventory into a deduplicated tagging plan.
//!
//! # Architecture
//!
//! - **RuleSet**: rule records normalized and grouped by filter key
//! - **ResourceIndex**: per-resource lookup keys (identifier, name, type, service)
//! - **MatchEngine**: evaluates every filter category against one resource
//! - **PlanBuilder**: drives the engine over an inventory with a region guard
//!   and duplicate suppression
//!
//! # Example
//!
//! ```csv
//! Filter,TagKey,TagValue
//! # Lines beginning with # are skipped
//! ec2:instance,Backup,Daily
//! s3,Schedule,24x7
//! arn:aws:s3:::s3bucket-random-characters,Backup,Daily
//! web,Schedule,24x7
//! ~partial_name,Application,CRM
//! tag:Environment:~prod,Backup,Hourly
//! all,BusinessUnit,DigitalPlatform
//! ```

pub mod constants;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod planner;
pub mod rule;
pub mod rule_set;
pub mod writer;

// Re-export core types
pub use constants::*;
pub use index::{derive_match_keys, MatchKeySet, ResourceIndex};
pub use loader::{load_from_reader, RuleLoader};
pub use matcher::MatchEngine;
pub use planner::{build_plan, Plan, PlanBuilder, PlanStats};
pub use rule::{FilterKind, RawRuleRecord, TagFilter, TagRule};
pub use rule_set::{RuleSet, TagFilterGroup};
pub use writer::{write_plan, write_plan_to};

/// Result type for rule operations
pub type Result<T> = std::result::Result<T, RuleError>;

/// Error types for rule engine
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid rule file {path}: {reason}")]
    InputFormat { path: String, reason: String },

    #[error("Invalid rule input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
