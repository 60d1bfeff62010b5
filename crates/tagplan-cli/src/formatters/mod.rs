//! Output formatters for plan summaries.

pub mod human;
pub mod json;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

use crate::cli::plan::PlanSummary;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting plan summaries
pub trait Formatter {
    /// Format and print the summary
    fn format(&self, summary: &PlanSummary);
}

impl Formatter for HumanFormatter {
    fn format(&self, summary: &PlanSummary) {
        human::print_summary(summary);
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, summary: &PlanSummary) {
        json::print_json(summary);
    }
}
