//! Normalized, queryable rule collection
//!
//! Identity, partial-name and catch-all rules are grouped by filter key in
//! first-seen order. Tag filters live in a separate ordered list so the
//! matcher never has to re-parse `tag:` keys per resource.

use crate::constants::{CATCH_ALL_KEY, TAG_FILTER_PREFIX};
use crate::rule::{FilterKind, RawRuleRecord, TagFilter, TagRule};
use crate::{Result, RuleError};
use std::collections::{BTreeMap, HashMap};
use tagplan_core::AuditLog;

/// Rules sharing one tag filter.
#[derive(Debug, Clone)]
pub struct TagFilterGroup {
    pub filter: TagFilter,
    pub rules: Vec<TagRule>,
}

/// All rules of a run, grouped by filter key.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Filter keys in first-seen order
    order: Vec<String>,
    /// Non-tag rules keyed by filter key (includes `all`)
    groups: HashMap<String, Vec<TagRule>>,
    /// Tag filters in first-seen order
    tag_filters: Vec<TagFilterGroup>,
    /// Total accepted rules
    len: usize,
}

impl RuleSet {
    /// Build a rule set from raw records.
    ///
    /// Blank and comment rows are skipped. Each accepted or skipped record
    /// produces one audit entry.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidInput`] if `records` is empty.
    pub fn build(records: Vec<RawRuleRecord>, audit: &mut AuditLog) -> Result<Self> {
        if records.is_empty() {
            return Err(RuleError::InvalidInput(
                "rule source contains no records".to_string(),
            ));
        }

        let mut rule_set = Self::default();
        for record in &records {
            match TagRule::from_record(record) {
                Some(rule) => {
                    if rule_set.insert(rule) {
                        audit.info(format!(
                            "Tag rule: Filter={}, TagKey={}, TagValue={}",
                            record.filter, record.tag_key, record.tag_value
                        ));
                    } else {
                        audit.warn(format!(
                            "Skipping tag rule (line {}): filter '{}' has no value part (expected tag:<key>:<value>)",
                            record.line, record.filter
                        ));
                    }
                }
                None => {
                    audit.info(format!(
                        "Skipping tag rule (line {}, blank or comment): Filter={}",
                        record.line, record.filter
                    ));
                }
            }
        }

        tracing::debug!(
            rules = rule_set.len,
            keys = rule_set.order.len(),
            tag_filters = rule_set.tag_filters.len(),
            "Built rule set"
        );

        Ok(rule_set)
    }

    /// Register `rule`. Returns false for tag filters without a value part.
    fn insert(&mut self, rule: TagRule) -> bool {
        if rule.filter_key.starts_with(TAG_FILTER_PREFIX) {
            if let Some(group) = self
                .tag_filters
                .iter_mut()
                .find(|group| group.filter.filter_key == rule.filter_key)
            {
                group.rules.push(rule);
                self.len += 1;
                return true;
            }
            let Some(filter) = TagFilter::parse(&rule.filter_key) else {
                return false;
            };
            self.tag_filters.push(TagFilterGroup {
                filter,
                rules: vec![rule],
            });
            self.len += 1;
            return true;
        }

        self.len += 1;
        match self.groups.get_mut(&rule.filter_key) {
            Some(rules) => rules.push(rule),
            None => {
                self.order.push(rule.filter_key.clone());
                self.groups.insert(rule.filter_key.clone(), vec![rule]);
            }
        }
        true
    }

    /// Rules registered under an exact filter key.
    pub fn get(&self, filter_key: &str) -> &[TagRule] {
        self.groups
            .get(filter_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-tag filter keys with their rules, in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[TagRule])> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.get(key)))
    }

    /// Rules flagged partial, in first-seen key order.
    pub fn partial_rules(&self) -> impl Iterator<Item = &TagRule> {
        self.groups()
            .flat_map(|(_, rules)| rules.iter())
            .filter(|rule| rule.is_partial)
    }

    /// Tag filters in first-seen order.
    pub fn tag_filters(&self) -> &[TagFilterGroup] {
        &self.tag_filters
    }

    /// Rules under the `all` key.
    pub fn catch_all(&self) -> &[TagRule] {
        self.get(CATCH_ALL_KEY)
    }

    /// Number of accepted rules.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rule counts by filter kind, for summaries.
    pub fn kind_counts(&self) -> BTreeMap<FilterKind, usize> {
        let mut counts = BTreeMap::new();
        let all_rules = self
            .groups()
            .flat_map(|(_, rules)| rules.iter())
            .chain(self.tag_filters.iter().flat_map(|group| group.rules.iter()));
        for rule in all_rules {
            *counts.entry(rule.kind()).or_insert(0) += 1;
        }
        counts
    }
}
