//! JSON formatter for plan summaries.

use crate::cli::plan::PlanSummary;

pub struct JsonFormatter;

pub fn print_json(summary: &PlanSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing summary: {}", e),
    }
}
