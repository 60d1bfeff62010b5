//! Plan generation across an inventory
//!
//! [`PlanBuilder`] drives the [`MatchEngine`] over every resource, applies the
//! region guard, and removes duplicate rows. The duplicate set lives for one
//! [`PlanBuilder::build`] call only.

use crate::matcher::MatchEngine;
use crate::rule_set::RuleSet;
use serde::Serialize;
use std::collections::HashSet;
use tagplan_core::{region_of, AuditLog, PlanRow, Resource};

/// Counters collected while building a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub resources_seen: usize,
    pub resources_matched: usize,
    pub resources_unmatched: usize,
    pub region_mismatches: usize,
    pub malformed_skipped: usize,
    pub rows_written: usize,
    pub duplicates_suppressed: usize,
}

/// Result of one planning run.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Unique rows in resource order, then emission order
    pub rows: Vec<PlanRow>,
    pub audit: AuditLog,
    pub stats: PlanStats,
}

/// Builds a plan for a single region.
#[derive(Debug, Clone)]
pub struct PlanBuilder<'a> {
    engine: MatchEngine<'a>,
    region: String,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(rules: &'a RuleSet, region: impl Into<String>) -> Self {
        Self {
            engine: MatchEngine::new(rules),
            region: region.into(),
        }
    }

    /// Region every planned resource must belong to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Match every resource and collect unique rows.
    pub fn build<'r, I>(&self, resources: I) -> Plan
    where
        I: IntoIterator<Item = &'r Resource>,
    {
        let mut plan = Plan::default();
        let mut written: HashSet<PlanRow> = HashSet::new();

        for resource in resources {
            plan.stats.resources_seen += 1;

            if !resource.is_well_formed() {
                plan.stats.malformed_skipped += 1;
                plan.audit.warn(format!(
                    "Skipping resource with missing identifier or service: identifier={:?}, service={:?}",
                    resource.identifier, resource.service
                ));
                continue;
            }

            if let Some(resource_region) = region_of(&resource.identifier) {
                if resource_region != self.region {
                    plan.stats.region_mismatches += 1;
                    plan.audit.info(format!(
                        "Skipping {} due to region mismatch {}",
                        resource.identifier, resource_region
                    ));
                    continue;
                }
            }

            let tags = self.engine.match_tags(resource);
            if tags.is_empty() {
                plan.stats.resources_unmatched += 1;
                plan.audit.info(format!(
                    "No matching tags for {} ({})",
                    resource.identifier, resource.service
                ));
                continue;
            }

            plan.stats.resources_matched += 1;
            for tag in &tags {
                let row = PlanRow::new(&resource.identifier, tag);
                if written.contains(&row) {
                    plan.stats.duplicates_suppressed += 1;
                    continue;
                }
                plan.audit.info(format!(
                    "Wrote tag plan: {}, {}, {}",
                    row.identifier, row.tag_key, row.tag_value
                ));
                written.insert(row.clone());
                plan.rows.push(row);
            }
        }

        plan.stats.rows_written = plan.rows.len();
        tracing::debug!(
            region = %self.region,
            rows = plan.stats.rows_written,
            resources = plan.stats.resources_seen,
            "Built plan"
        );

        plan
    }
}

/// Build a plan for `region` in one call.
pub fn build_plan<'r, I>(resources: I, rules: &RuleSet, region: &str) -> Plan
where
    I: IntoIterator<Item = &'r Resource>,
{
    PlanBuilder::new(rules, region).build(resources)
}
