//! End-to-end planning tests
//!
//! These tests load rule files from disk, build plans over small
//! inventories, and check the plan-level guarantees:
//! - no duplicate rows
//! - no rows for resources outside the planned region
//! - catch-all rules only follow another match

use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use tagplan_core::{AuditLog, Resource, Tag};
use tagplan_rule_engine::{
    build_plan, write_plan, RawRuleRecord, RuleError, RuleLoader, RuleSet,
};
use tempfile::TempDir;

const SAMPLE_RULES: &str = "\
Filter,TagKey,TagValue
# Lines beginning with # are skipped
ec2:instance,Backup,Daily
s3,Schedule,24x7
arn:aws:s3:::s3bucket-random-characters,Backup,Daily
web,Schedule,24x7
~partial_name,Application,CRM
tag:Environment:~prod,Backup,Hourly
all,BusinessUnit,DigitalPlatform
";

fn sample_inventory() -> Vec<Resource> {
    vec![
        Resource::new(
            "arn:aws:ec2:us-west-2:123456789012:instance/i-0001",
            "ec2",
            "instance",
        )
        .with_tags(vec![Tag::new("Name", "web")]),
        Resource::new("arn:aws:s3:::s3bucket-random-characters", "s3", "bucket"),
        Resource::new(
            "arn:aws:rds:us-west-2:123456789012:db:orders",
            "rds",
            "db",
        )
        .with_tags(vec![
            Tag::new("Name", "orders-partial_name-primary"),
            Tag::new("environment", "Production"),
        ]),
        Resource::new(
            "arn:aws:ec2:us-east-1:123456789012:instance/i-0002",
            "ec2",
            "instance",
        ),
        Resource::new(
            "arn:aws:lambda:us-west-2:123456789012:function:noop",
            "lambda",
            "function",
        ),
    ]
}

fn load_rules(dir: &TempDir, contents: &str) -> Result<RuleSet, RuleError> {
    let path = dir.path().join("tags.csv");
    fs::write(&path, contents).unwrap();
    let records = RuleLoader::new(&path).load()?;
    RuleSet::build(records, &mut AuditLog::new())
}

#[test]
fn test_sample_rules_produce_expected_plan() {
    let dir = TempDir::new().unwrap();
    let rules = load_rules(&dir, SAMPLE_RULES).unwrap();
    let inventory = sample_inventory();

    let plan = build_plan(&inventory, &rules, "us-west-2");
    let rows: Vec<(String, String, String)> = plan
        .rows
        .iter()
        .map(|r| (r.identifier.clone(), r.tag_key.clone(), r.tag_value.clone()))
        .collect();

    let instance = "arn:aws:ec2:us-west-2:123456789012:instance/i-0001";
    let bucket = "arn:aws:s3:::s3bucket-random-characters";
    let db = "arn:aws:rds:us-west-2:123456789012:db:orders";
    let expected: Vec<(String, String, String)> = [
        (instance, "Schedule", "24x7"),
        (instance, "Backup", "Daily"),
        (instance, "BusinessUnit", "DigitalPlatform"),
        (bucket, "Backup", "Daily"),
        (bucket, "Schedule", "24x7"),
        (bucket, "BusinessUnit", "DigitalPlatform"),
        (db, "Application", "CRM"),
        (db, "Backup", "Hourly"),
        (db, "BusinessUnit", "DigitalPlatform"),
    ]
    .iter()
    .map(|(a, k, v)| (a.to_string(), k.to_string(), v.to_string()))
    .collect();

    assert_eq!(rows, expected);
    assert_eq!(plan.stats.region_mismatches, 1);
    assert_eq!(plan.stats.resources_unmatched, 1);
}

#[test]
fn test_missing_tag_key_column_fails_before_planning() {
    let dir = TempDir::new().unwrap();
    let err = load_rules(&dir, "Filter,TagValue\nec2,Daily\n").unwrap_err();
    assert!(matches!(err, RuleError::InputFormat { .. }));
}

#[test]
fn test_header_only_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let err = load_rules(&dir, "Filter,TagKey,TagValue\n").unwrap_err();
    assert!(matches!(err, RuleError::InvalidInput(_)));
}

#[test]
fn test_plan_file_round_trip_is_stable() {
    let dir = TempDir::new().unwrap();
    let rules = load_rules(&dir, SAMPLE_RULES).unwrap();
    let inventory = sample_inventory();

    let first_path = dir.path().join("first.csv");
    let second_path = dir.path().join("second.csv");
    write_plan(&first_path, &build_plan(&inventory, &rules, "us-west-2").rows).unwrap();
    write_plan(&second_path, &build_plan(&inventory, &rules, "us-west-2").rows).unwrap();

    let first = fs::read(&first_path).unwrap();
    let second = fs::read(&second_path).unwrap();
    assert_eq!(first, second);
    assert!(String::from_utf8(first)
        .unwrap()
        .starts_with("ResourceARN,TagKey,TagValue\n"));
}

// ============================================================================
// Property tests
// ============================================================================

const REGIONS: [&str; 3] = ["us-west-2", "us-east-1", ""];
const SERVICES: [&str; 3] = ["ec2", "s3", "rds"];
const NAMES: [&str; 4] = ["web-01", "api", "webster", ""];
const FILTERS: [&str; 8] = [
    "ec2",
    "s3:bucket",
    "~web",
    "api",
    "tag:env:prod",
    "tag:env:~pro",
    "rds:db",
    "all",
];

fn resource_strategy() -> impl Strategy<Value = Resource> {
    (0..3usize, 0..3usize, 0..4usize, 0..4u8, any::<bool>()).prop_map(
        |(region, service, name, id, prod)| {
            let service = SERVICES[service];
            let mut tags = Vec::new();
            if !NAMES[name].is_empty() {
                tags.push(Tag::new("Name", NAMES[name]));
            }
            tags.push(Tag::new("Env", if prod { "production" } else { "dev" }));
            Resource::new(
                format!("arn:aws:{}:{}:1:thing/{}", service, REGIONS[region], id),
                service,
                match service {
                    "ec2" => "instance",
                    "s3" => "bucket",
                    _ => "db",
                },
            )
            .with_tags(tags)
        },
    )
}

fn rules_strategy() -> impl Strategy<Value = Vec<RawRuleRecord>> {
    prop::collection::vec((0..FILTERS.len(), 0..3u8, 0..2u8), 1..10).prop_map(|rows| {
        rows.into_iter()
            .map(|(f, k, v)| RawRuleRecord::new(FILTERS[f], format!("K{k}"), format!("V{v}")))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_no_duplicate_rows(
        records in rules_strategy(),
        resources in prop::collection::vec(resource_strategy(), 0..20),
    ) {
        let rules = RuleSet::build(records, &mut AuditLog::new()).unwrap();
        let plan = build_plan(&resources, &rules, "us-west-2");
        let unique: HashSet<_> = plan.rows.iter().collect();
        prop_assert_eq!(unique.len(), plan.rows.len());
    }

    #[test]
    fn prop_other_regions_never_planned(
        records in rules_strategy(),
        resources in prop::collection::vec(resource_strategy(), 0..20),
    ) {
        let rules = RuleSet::build(records, &mut AuditLog::new()).unwrap();
        let plan = build_plan(&resources, &rules, "us-west-2");
        for row in &plan.rows {
            prop_assert!(!row.identifier.contains(":us-east-1:"));
        }
    }

    #[test]
    fn prop_catch_all_only_after_other_match(
        records in rules_strategy(),
        resource in resource_strategy(),
    ) {
        let mut with_all = records.clone();
        with_all.push(RawRuleRecord::new("all", "CatchAll", "Yes"));
        let without_all: Vec<_> = records
            .into_iter()
            .filter(|r| r.filter != "all")
            .collect();

        let rules_with = RuleSet::build(with_all, &mut AuditLog::new()).unwrap();
        let plan = build_plan(std::slice::from_ref(&resource), &rules_with, "us-west-2");
        let has_catch_all = plan.rows.iter().any(|r| r.tag_key == "CatchAll");

        let other_matched = if without_all.is_empty() {
            false
        } else {
            let rules_without = RuleSet::build(without_all, &mut AuditLog::new()).unwrap();
            !build_plan(std::slice::from_ref(&resource), &rules_without, "us-west-2")
                .rows
                .is_empty()
        };

        prop_assert_eq!(has_catch_all, other_matched);
    }

    #[test]
    fn prop_build_is_deterministic(
        records in rules_strategy(),
        resources in prop::collection::vec(resource_strategy(), 0..20),
    ) {
        let rules = RuleSet::build(records, &mut AuditLog::new()).unwrap();
        let first = build_plan(&resources, &rules, "us-west-2");
        let second = build_plan(&resources, &rules, "us-west-2");
        prop_assert_eq!(first.rows, second.rows);
    }
}
