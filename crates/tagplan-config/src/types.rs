use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current schema version
pub const CONFIG_VERSION: &str = "1.0";

/// Main configuration structure for tagplan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagplanConfig {
    /// Schema version for migrations
    pub version: String,

    /// Defaults for `tagplan` runs
    #[serde(default)]
    pub settings: Settings,
}

impl Default for TagplanConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            settings: Settings::default(),
        }
    }
}

/// Run defaults. Command line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Region whose resources are planned
    #[serde(default = "default_region")]
    pub region: String,

    /// Name of the resource view to list resources through
    #[serde(default = "default_view")]
    pub view: String,

    /// Directory holding the inventory snapshot
    #[serde(default = "default_dir")]
    pub inventory_dir: PathBuf,

    /// Directory the plan and log files are written to
    #[serde(default = "default_dir")]
    pub output_dir: PathBuf,

    /// Identifiers per tag lookup (1-100)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Tag lookups per second
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: default_region(),
            view: default_view(),
            inventory_dir: default_dir(),
            output_dir: default_dir(),
            batch_size: default_batch_size(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

fn default_region() -> String {
    "us-west-2".to_string()
}

fn default_view() -> String {
    "all-resources-with-tags".to_string()
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_batch_size() -> usize {
    100
}

fn default_requests_per_second() -> u32 {
    10
}
