use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tagplan_config::{ConfigManager, TagplanConfig};
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Initialize config file at ~/.tagplan/config.toml
    Init,

    /// Print the effective settings
    Show,

    /// Show config file path
    Path,

    /// Validate config file
    Validate,
}

/// Run a config subcommand. `config_path` replaces the default location.
pub fn handle_config_command(cmd: ConfigCommand, config_path: Option<PathBuf>) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let path = match config_path {
        Some(path) => path,
        None => ConfigManager::config_path()?,
    };

    runtime.block_on(async {
        match cmd {
            ConfigCommand::Init => init_config(&path).await,
            ConfigCommand::Show => show_config(&path).await,
            ConfigCommand::Path => {
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Validate => validate_config(&path).await,
        }
    })
}

async fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists at: {}", path.display());
        println!("To reinitialize, please delete the existing config first.");
        return Ok(());
    }

    ConfigManager::init_at(path).await?;
    println!("✓ Initialized config at: {}", path.display());
    Ok(())
}

async fn show_config(path: &Path) -> Result<()> {
    let manager = ConfigManager::load_or_default_from(path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if !path.exists() {
        println!("# No config file at {}, showing defaults", path.display());
    }
    print!("{}", render_config(manager.config())?);
    Ok(())
}

fn render_config(config: &TagplanConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render config")
}

async fn validate_config(path: &Path) -> Result<()> {
    let manager = ConfigManager::load_from(path)
        .await
        .context("Config not found or invalid. Run 'tagplan config init' first.")?;

    let config = manager.config();
    println!("✓ Config is valid");
    println!("  Version: {}", config.version);
    println!("  Region: {}", config.settings.region);
    println!("  View: {}", config.settings.view);

    if !config.settings.inventory_dir.exists() {
        println!(
            "\nWarning: inventory directory does not exist: {}",
            config.settings.inventory_dir.display()
        );
    }

    Ok(())
}
