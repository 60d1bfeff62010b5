//! Rule definitions and types
//!
//! This module defines rules as they appear in the rule file
//! ([`RawRuleRecord`]) and in their normalized form ([`TagRule`]).

use crate::constants::{CATCH_ALL_KEY, PARTIAL_MARKER, TAG_FILTER_PREFIX};
use serde::{Deserialize, Serialize};
use tagplan_core::TagAssignment;

/// One row of the rule file, as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRuleRecord {
    /// Filter expression selecting the resources this rule targets
    #[serde(rename = "Filter", default)]
    pub filter: String,

    /// Tag key to apply
    #[serde(rename = "TagKey", default)]
    pub tag_key: String,

    /// Tag value to apply
    #[serde(rename = "TagValue", default)]
    pub tag_value: String,

    /// 1-based line in the source file (0 when built in memory)
    #[serde(skip)]
    pub line: u64,
}

impl RawRuleRecord {
    pub fn new(
        filter: impl Into<String>,
        tag_key: impl Into<String>,
        tag_value: impl Into<String>,
    ) -> Self {
        Self {
            filter: filter.into(),
            tag_key: tag_key.into(),
            tag_value: tag_value.into(),
            line: 0,
        }
    }
}

/// A normalized tagging rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRule {
    /// Lower-cased filter expression without the partial marker
    pub filter_key: String,
    pub tag_key: String,
    pub tag_value: String,
    /// Filter was written with a leading `~`
    pub is_partial: bool,
}

impl TagRule {
    /// Normalize a raw filter expression.
    ///
    /// Returns `None` for blank filters and comment rows.
    pub fn from_record(record: &RawRuleRecord) -> Option<Self> {
        let filter = record.filter.trim();
        if filter.is_empty() || filter.starts_with(crate::constants::COMMENT_MARKER) {
            return None;
        }

        let (filter, is_partial) = match filter.strip_prefix(PARTIAL_MARKER) {
            Some(rest) => (rest, true),
            None => (filter, false),
        };

        Some(Self {
            filter_key: filter.to_lowercase(),
            tag_key: record.tag_key.clone(),
            tag_value: record.tag_value.clone(),
            is_partial,
        })
    }

    /// The tag this rule applies.
    pub fn assignment(&self) -> TagAssignment {
        TagAssignment::new(&self.tag_key, &self.tag_value)
    }

    /// Classify the rule by how it selects resources.
    pub fn kind(&self) -> FilterKind {
        FilterKind::of(&self.filter_key, self.is_partial)
    }
}

/// How a rule selects resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact service, type, identifier or name
    Identity,
    /// Substring of the resource name
    PartialName,
    /// Existing tag key and value
    Tag,
    /// Every resource that matched another rule
    CatchAll,
}

impl FilterKind {
    pub fn of(filter_key: &str, is_partial: bool) -> Self {
        if filter_key == CATCH_ALL_KEY {
            FilterKind::CatchAll
        } else if filter_key.starts_with(TAG_FILTER_PREFIX) {
            FilterKind::Tag
        } else if is_partial {
            FilterKind::PartialName
        } else {
            FilterKind::Identity
        }
    }

    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::Identity,
            FilterKind::PartialName,
            FilterKind::Tag,
            FilterKind::CatchAll,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Identity => "identity",
            FilterKind::PartialName => "partial name",
            FilterKind::Tag => "tag",
            FilterKind::CatchAll => "catch-all",
        }
    }
}

/// Parsed `tag:<key>:<value>` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    /// The full filter key (`tag:env:~prod`)
    pub filter_key: String,
    /// Tag key to look for, lower-cased
    pub tag_key: String,
    /// Value to compare against, lower-cased, marker stripped
    pub value: String,
    /// Value was written with a leading `~`
    pub partial: bool,
}

impl TagFilter {
    /// Parse a lower-cased filter key.
    ///
    /// The value part may itself contain `:`. Returns `None` when the key is
    /// not a tag filter or has no value part.
    pub fn parse(filter_key: &str) -> Option<Self> {
        let rest = filter_key.strip_prefix(TAG_FILTER_PREFIX)?;
        let (tag_key, value) = rest.split_once(':')?;
        let (value, partial) = match value.strip_prefix(PARTIAL_MARKER) {
            Some(stripped) => (stripped, true),
            None => (value, false),
        };

        Some(Self {
            filter_key: filter_key.to_string(),
            tag_key: tag_key.to_lowercase(),
            value: value.to_lowercase(),
            partial,
        })
    }

    /// Whether a resource tag satisfies this filter (case-insensitive).
    pub fn matches(&self, key: &str, value: &str) -> bool {
        if key.to_lowercase() != self.tag_key {
            return false;
        }
        let value = value.to_lowercase();
        if self.partial {
            value.contains(&self.value)
        } else {
            value == self.value
        }
    }
}
