//! tagplan CLI library components.
//!
//! This crate provides the command-line interface for building tag plans.
//! The main binary is in `main.rs`.

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod logging;

pub use cli::plan::{execute, run_plan, PlanRequest, PlanRunOptions, PlanSummary};
pub use formatters::OutputFormat;
