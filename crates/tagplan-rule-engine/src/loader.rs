//! Rule file loading
//!
//! Reads the `Filter,TagKey,TagValue` CSV into [`RawRuleRecord`]s. Format
//! problems (wrong extension, oversized file, missing columns) are reported
//! as [`RuleError::InputFormat`] before any record is interpreted.

use crate::constants::{
    FILTER_COLUMN, MAX_RULE_FILE_SIZE, REQUIRED_COLUMNS, RULE_FILE_EXTENSION, TAG_KEY_COLUMN,
    TAG_VALUE_COLUMN,
};
use crate::rule::RawRuleRecord;
use crate::{Result, RuleError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Loads rule records from a CSV file.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    path: PathBuf,
}

impl RuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and read every data row of the rule file.
    pub fn load(&self) -> Result<Vec<RawRuleRecord>> {
        let source = self.path.display().to_string();

        let has_csv_extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == RULE_FILE_EXTENSION);
        if !has_csv_extension {
            return Err(RuleError::InputFormat {
                path: source,
                reason: format!("rule file must end with '.{}'", RULE_FILE_EXTENSION),
            });
        }

        let metadata = std::fs::metadata(&self.path).map_err(|e| RuleError::InputFormat {
            path: source.clone(),
            reason: format!("cannot read rule file: {}", e),
        })?;
        if metadata.len() > MAX_RULE_FILE_SIZE {
            return Err(RuleError::InputFormat {
                path: source,
                reason: format!(
                    "file exceeds maximum size of {}MB",
                    MAX_RULE_FILE_SIZE / 1_048_576
                ),
            });
        }

        let file = File::open(&self.path)?;
        let records = load_from_reader(file, &source)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "Loaded rule records");
        Ok(records)
    }
}

/// Read rule records from any CSV source.
///
/// `source` names the input in error messages.
pub fn load_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<RawRuleRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| RuleError::InputFormat {
            path: source.to_string(),
            reason: format!("cannot read header row: {}", e),
        })?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
    };
    let (filter_idx, key_idx, value_idx) = match (
        column(FILTER_COLUMN),
        column(TAG_KEY_COLUMN),
        column(TAG_VALUE_COLUMN),
    ) {
        (Some(f), Some(k), Some(v)) => (f, k, v),
        _ => {
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|name| column(*name).is_none())
                .collect();
            return Err(RuleError::InputFormat {
                path: source.to_string(),
                reason: format!(
                    "missing required column(s) {} (header must include {})",
                    missing.join(", "),
                    REQUIRED_COLUMNS.join(",")
                ),
            });
        }
    };

    // Rows may be shorter than the header (e.g. a lone `# comment`); absent
    // fields read as empty.
    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|e| RuleError::InputFormat {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
        let field = |idx: usize| row.get(idx).unwrap_or("").to_string();
        records.push(RawRuleRecord {
            filter: field(filter_idx),
            tag_key: field(key_idx),
            tag_value: field(value_idx),
            line: row.position().map_or(0, |pos| pos.line()),
        });
    }

    Ok(records)
}
