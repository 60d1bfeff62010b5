//! Rule matching against a single resource
//!
//! [`MatchEngine`] evaluates every rule category against one resource, in a
//! fixed order:
//!
//! 1. exact identity / service / type / name
//! 2. partial (substring) name
//! 3. tag key and value, exact or partial
//! 4. catch-all, only when 1-3 produced something
//!
//! Categories are additive. Duplicates are left in the result; the planner
//! removes them.

use crate::index::ResourceIndex;
use crate::rule::TagRule;
use crate::rule_set::RuleSet;
use tagplan_core::{Resource, TagAssignment};

/// Matches resources against a shared, immutable rule set.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'a> {
    rules: &'a RuleSet,
}

impl<'a> MatchEngine<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Tags to apply to `resource`, in emission order.
    pub fn match_tags(&self, resource: &Resource) -> Vec<TagAssignment> {
        self.match_index(&ResourceIndex::new(resource))
    }

    /// Same as [`match_tags`](Self::match_tags) for an already indexed resource.
    pub fn match_index(&self, index: &ResourceIndex<'_>) -> Vec<TagAssignment> {
        let mut tags = Vec::new();

        self.match_exact(index, &mut tags);
        self.match_partial_name(index, &mut tags);
        self.match_resource_tags(index, &mut tags);

        if !tags.is_empty() {
            extend_with(&mut tags, self.rules.catch_all());
        }

        tracing::trace!(
            resource = %index.resource.identifier,
            matched = tags.len(),
            "Evaluated rules"
        );

        tags
    }

    fn match_exact(&self, index: &ResourceIndex<'_>, tags: &mut Vec<TagAssignment>) {
        for key in index.keys.iter() {
            for rule in self.rules.get(key).iter().filter(|rule| !rule.is_partial) {
                tags.push(rule.assignment());
            }
        }
    }

    fn match_partial_name(&self, index: &ResourceIndex<'_>, tags: &mut Vec<TagAssignment>) {
        let Some(name) = index.name_lower() else {
            return;
        };
        for rule in self.rules.partial_rules() {
            if name.contains(&rule.filter_key) {
                tags.push(rule.assignment());
            }
        }
    }

    fn match_resource_tags(&self, index: &ResourceIndex<'_>, tags: &mut Vec<TagAssignment>) {
        for group in self.rules.tag_filters() {
            for tag in &index.resource.tags {
                if group.filter.matches(&tag.key, &tag.value) {
                    extend_with(tags, &group.rules);
                }
            }
        }
    }
}

fn extend_with(tags: &mut Vec<TagAssignment>, rules: &[TagRule]) {
    tags.extend(rules.iter().map(TagRule::assignment));
}
