//! Plan run orchestration.
//!
//! Steps, in order: load rules, name the output files, resolve the view, list
//! resources, collect tags, build the plan, write the plan and the audit log.
//! Rule problems fail before the inventory is touched. Once the output files
//! are named, the audit log is written even when a later step fails.

use crate::formatters::{self, Formatter, OutputFormat};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tagplan_config::{validate_settings, ConfigManager, Settings};
use tagplan_core::{AuditLevel, AuditLog};
use tagplan_inventory::{require_view, CollectStats, Inventory, SnapshotInventory, TagCollector};
use tagplan_rule_engine::{write_plan, PlanBuilder, PlanStats, RuleLoader, RuleSet};
use tokio::runtime::Runtime;

/// Options for running the planner from the command line.
#[derive(Debug, Clone)]
pub struct PlanRunOptions {
    pub tags: PathBuf,
    pub region: Option<String>,
    pub view: Option<String>,
    pub inventory_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub limit: Option<usize>,
    pub format: OutputFormat,
    pub command_line: Vec<String>,
}

/// Inputs of one planning run that do not come from [`Settings`].
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub tags: PathBuf,
    pub limit: Option<usize>,
    pub command_line: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub account: String,
    pub region: String,
    pub view: String,
    pub rules_file: PathBuf,
    pub rules: usize,
    pub resources_listed: usize,
    pub plan_file: PathBuf,
    pub log_file: PathBuf,
    pub tags: CollectStats,
    pub plan: PlanStats,
    pub warnings: usize,
}

/// Plan and log file locations of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub plan: PathBuf,
    pub log: PathBuf,
}

impl OutputFiles {
    pub fn new(dir: &Path, account: &str, started: DateTime<Local>) -> Self {
        let stamp = started.format("%Y%m%d_%H%M%S");
        Self {
            plan: dir.join(format!("tag_plan_{}_{}.csv", account, stamp)),
            log: dir.join(format!("create_tag_plan_{}_{}.log", account, stamp)),
        }
    }
}

/// Runs the planner with the given options and prints a summary.
pub fn run_plan(options: &PlanRunOptions) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    let settings = runtime.block_on(resolve_settings(options))?;
    tracing::debug!(?settings, "Resolved settings");

    let inventory = SnapshotInventory::new(&settings.inventory_dir);
    let request = PlanRequest {
        tags: options.tags.clone(),
        limit: options.limit,
        command_line: options.command_line.clone(),
    };

    eprintln!("{}", progress_line(&request, &settings));

    let summary = runtime.block_on(execute(&inventory, &settings, &request))?;

    match options.format {
        OutputFormat::Human => formatters::HumanFormatter.format(&summary),
        OutputFormat::Json => formatters::JsonFormatter.format(&summary),
    }

    Ok(())
}

/// Progress note printed to stderr before the run, in every output mode.
fn progress_line(request: &PlanRequest, settings: &Settings) -> String {
    format!(
        "Planning tags for {} in {} using view '{}'...",
        request.tags.display(),
        settings.region,
        settings.view
    )
}

/// Config file values overridden by command line flags.
async fn resolve_settings(options: &PlanRunOptions) -> Result<Settings> {
    let manager = match &options.config {
        Some(path) => ConfigManager::load_from(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigManager::load_or_default()
            .await
            .context("Failed to load config")?,
    };

    let mut settings = manager.config().settings.clone();
    apply_overrides(&mut settings, options);
    validate_settings(&settings).context("Invalid settings")?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, options: &PlanRunOptions) {
    if let Some(region) = &options.region {
        settings.region = region.clone();
    }
    if let Some(view) = &options.view {
        settings.view = view.clone();
    }
    if let Some(dir) = &options.inventory_dir {
        settings.inventory_dir = dir.clone();
    }
    if let Some(dir) = &options.output_dir {
        settings.output_dir = dir.clone();
    }
}

/// Run the whole pipeline against `inventory`.
pub async fn execute<I: Inventory + ?Sized>(
    inventory: &I,
    settings: &Settings,
    request: &PlanRequest,
) -> Result<PlanSummary> {
    let mut audit = AuditLog::new();
    audit.info(format!("Command: {:?}", request.command_line));

    let records = RuleLoader::new(&request.tags)
        .load()
        .context("Failed to load tag rules")?;
    let rules = RuleSet::build(records, &mut audit).context("Failed to build tag rules")?;
    audit.info(format!("Using tag rules from {}", request.tags.display()));

    let account = inventory
        .account_id(&settings.region)
        .await
        .context("Failed to determine account id")?
        .unwrap_or_else(|| "unknown".to_string());

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;
    let files = OutputFiles::new(&settings.output_dir, &account, Local::now());

    let outcome = plan_and_write(inventory, settings, request, &rules, &files, &mut audit).await;
    if let Err(e) = &outcome {
        audit.error(format!("{:#}. Exiting.", e));
    }
    write_audit_log(&files.log, &audit)?;

    let (view, resources_listed, tags, plan) = outcome?;
    Ok(PlanSummary {
        account,
        region: settings.region.clone(),
        view,
        rules_file: request.tags.clone(),
        rules: rules.len(),
        resources_listed,
        plan_file: files.plan,
        log_file: files.log,
        tags,
        plan,
        warnings: audit
            .entries()
            .iter()
            .filter(|e| e.level == AuditLevel::Warning)
            .count(),
    })
}

async fn plan_and_write<I: Inventory + ?Sized>(
    inventory: &I,
    settings: &Settings,
    request: &PlanRequest,
    rules: &RuleSet,
    files: &OutputFiles,
    audit: &mut AuditLog,
) -> Result<(String, usize, CollectStats, PlanStats)> {
    let view = require_view(inventory, &settings.region, &settings.view).await?;
    audit.info(format!("Discovering resources using view: {}", view));

    let mut resources = inventory
        .list_resources(&settings.region, &view)
        .await
        .context("Failed to list resources")?;
    if let Some(limit) = request.limit {
        resources.truncate(limit);
    }
    let resources_listed = resources.len();

    let collector = TagCollector::with_rate_limit(settings.requests_per_second)?
        .with_batch_size(settings.batch_size);
    let tag_stats = collector.collect(inventory, &mut resources, audit).await;

    let plan = PlanBuilder::new(rules, &settings.region).build(&resources);
    audit.extend(plan.audit);

    write_plan(&files.plan, &plan.rows)
        .with_context(|| format!("Failed to write tag plan: {}", files.plan.display()))?;

    audit.info(format!("Tag plan: {}", files.plan.display()));
    audit.info(format!("Log file: {}", files.log.display()));

    Ok((view, resources_listed, tag_stats, plan.stats))
}

fn write_audit_log(path: &Path, audit: &AuditLog) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    audit
        .write_to(BufWriter::new(file))
        .with_context(|| format!("Failed to write log file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn options() -> PlanRunOptions {
        PlanRunOptions {
            tags: PathBuf::from("rules.csv"),
            region: None,
            view: None,
            inventory_dir: None,
            output_dir: None,
            config: None,
            limit: None,
            format: OutputFormat::Human,
            command_line: vec!["tagplan".to_string()],
        }
    }

    #[test]
    fn test_output_file_names() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let files = OutputFiles::new(Path::new("out"), "123456789012", started);
        assert_eq!(
            files.plan,
            Path::new("out").join("tag_plan_123456789012_20240309_140507.csv")
        );
        assert_eq!(
            files.log,
            Path::new("out").join("create_tag_plan_123456789012_20240309_140507.log")
        );
    }

    #[test]
    fn test_progress_line() {
        let request = PlanRequest {
            tags: PathBuf::from("rules.csv"),
            limit: None,
            command_line: Vec::new(),
        };
        assert_eq!(
            progress_line(&request, &Settings::default()),
            "Planning tags for rules.csv in us-west-2 using view 'all-resources-with-tags'..."
        );
    }

    #[test]
    fn test_flags_override_config() {
        let mut settings = Settings {
            region: "eu-west-1".to_string(),
            ..Settings::default()
        };
        let mut opts = options();
        opts.view = Some("tagged".to_string());
        opts.output_dir = Some(PathBuf::from("/tmp/plans"));

        apply_overrides(&mut settings, &opts);
        assert_eq!(settings.region, "eu-west-1");
        assert_eq!(settings.view, "tagged");
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/plans"));
        assert_eq!(settings.inventory_dir, PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_explicit_missing_config_fails() {
        let mut opts = options();
        opts.config = Some(PathBuf::from("/nonexistent/tagplan/config.toml"));
        assert!(resolve_settings(&opts).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_region_flag_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        ConfigManager::init_at(&config).await.unwrap();

        let mut opts = options();
        opts.config = Some(config);
        opts.region = Some("nowhere".to_string());
        let err = resolve_settings(&opts).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid region"));
    }
}
