//! Human-readable formatter for plan summaries.

use crate::cli::plan::PlanSummary;
use colored::*;

pub struct HumanFormatter;

pub fn print_summary(summary: &PlanSummary) {
    println!("Using tag rules from {}", summary.rules_file.display());
    println!("Discovering resources using view: {}", summary.view);
    println!();

    println!("{}", "Summary:".bold());
    println!("  Account: {}", summary.account);
    println!("  Region: {}", summary.region);
    println!("  Rules: {}", summary.rules);
    println!("  Resources listed: {}", summary.resources_listed);
    println!(
        "  Matched: {}  Unmatched: {}  Other regions: {}",
        summary.plan.resources_matched.to_string().green(),
        summary.plan.resources_unmatched,
        summary.plan.region_mismatches
    );
    if summary.plan.malformed_skipped > 0 {
        println!(
            "  {} {} malformed resources skipped",
            "⚠".yellow(),
            summary.plan.malformed_skipped
        );
    }
    if summary.tags.failed_batches > 0 {
        println!(
            "  {} {} of {} tag lookups failed; affected resources were planned without tags",
            "⚠".yellow(),
            summary.tags.failed_batches,
            summary.tags.batches
        );
    }
    println!(
        "  Rows: {} ({} duplicates suppressed)",
        summary.plan.rows_written.to_string().bold(),
        summary.plan.duplicates_suppressed
    );
    if summary.warnings > 0 {
        println!(
            "  {}",
            format!("{} warnings, see the log file", summary.warnings).yellow()
        );
    }
    println!();

    println!("{} Tag plan: {}", "✓".green(), summary.plan_file.display());
    println!("{} Log file: {}", "✓".green(), summary.log_file.display());
}
