//! tagplan CLI - build resource tag plans from CSV tag rules.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tagplan_cli::commands::{self, ConfigCommand};
use tagplan_cli::{logging, run_plan, OutputFormat, PlanRunOptions};

#[derive(Parser, Debug)]
#[command(name = "tagplan", version)]
#[command(about = "Create a resource tag plan from tag rules and a resource inventory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Tag rule CSV file (Filter,TagKey,TagValue)
    ///
    /// Filter forms:
    ///   ec2                        every resource of a service
    ///   ec2:instance               every resource of a type
    ///   arn:aws:...                one resource
    ///   web-server-01              resource with this Name tag
    ///   ~web                       Name tag containing "web"
    ///   tag:Env:prod               resource tag equal to a value
    ///   tag:Env:~prod              resource tag containing a value
    ///   all                        added to every otherwise matched resource
    #[arg(long, value_name = "FILE", verbatim_doc_comment)]
    tags: Option<PathBuf>,

    /// Region to plan for [default: us-west-2]
    #[arg(long)]
    region: Option<String>,

    /// Resource view name [default: all-resources-with-tags]
    #[arg(long)]
    view: Option<String>,

    /// Directory holding the inventory snapshot [default: .]
    #[arg(long, value_name = "DIR")]
    inventory: Option<PathBuf>,

    /// Directory the plan and log files are written to [default: .]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plan at most this many resources
    #[arg(long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Manage tagplan configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Some(Command::Config { command }) => commands::handle_config_command(command, cli.config),
        None => {
            let Some(tags) = cli.tags else {
                bail!("--tags <FILE> is required");
            };

            run_plan(&PlanRunOptions {
                tags,
                region: cli.region,
                view: cli.view,
                inventory_dir: cli.inventory,
                output_dir: cli.output_dir,
                config: cli.config,
                limit: cli.limit,
                format: cli.format,
                command_line: std::env::args().collect(),
            })
        }
    }
}
