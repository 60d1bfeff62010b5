use crate::types::TagplanConfig;
use crate::validation::{validate_settings, ValidationError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("Home directory not found")]
    HomeNotFound,

    #[error("Invalid settings: {0}")]
    Validation(#[from] ValidationError),
}

/// Manager for tagplan configuration
///
/// Manages the configuration stored in ~/.tagplan/config.toml.
pub struct ConfigManager {
    config_path: PathBuf,
    config: TagplanConfig,
}

impl ConfigManager {
    /// Get the default config path (~/.tagplan/config.toml)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".tagplan").join("config.toml"))
    }

    /// Load config from default location
    pub async fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path).await
    }

    /// Load config from default location, falling back to defaults when
    /// no file exists yet
    pub async fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_or_default_from(&config_path).await
    }

    /// Load config from specific path (useful for testing)
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: TagplanConfig = toml::from_str(&contents)?;
        validate_settings(&config.settings)?;

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    pub async fn load_or_default_from(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from(path).await {
            Err(ConfigError::ConfigNotFound(_)) => Ok(Self {
                config_path: path.to_path_buf(),
                config: TagplanConfig::default(),
            }),
            other => other,
        }
    }

    /// Initialize a new config file
    pub async fn init() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::init_at(&config_path).await
    }

    /// Initialize config at specific path. Refuses to overwrite an existing file.
    pub async fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let manager = Self {
            config_path: path.to_path_buf(),
            config: TagplanConfig::default(),
        };
        manager.save().await?;

        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn save(&self) -> Result<(), ConfigError> {
        validate_settings(&self.config.settings)?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        tokio::fs::write(&temp_path, &toml_str).await?;
        set_config_permissions(&temp_path)?;

        tokio::fs::rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    /// Path this config is loaded from and saved to
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get reference to config
    pub fn config(&self) -> &TagplanConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut TagplanConfig {
        &mut self.config
    }
}

/// Set restrictive permissions on config file (Unix only)
#[cfg(unix)]
fn set_config_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_config_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let manager = ConfigManager::init_at(&config_path).await.unwrap();
        assert_eq!(manager.config().version, "1.0");

        let loaded = ConfigManager::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.config(), manager.config());
        assert_eq!(loaded.path(), config_path);
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        ConfigManager::init_at(&config_path).await.unwrap();

        let result = ConfigManager::init_at(&config_path).await;
        assert!(matches!(result, Err(ConfigError::ConfigExists(_))));
    }

    #[tokio::test]
    async fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let result = ConfigManager::load_from(&config_path).await;
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));

        let fallback = ConfigManager::load_or_default_from(&config_path)
            .await
            .unwrap();
        assert_eq!(fallback.config(), &TagplanConfig::default());
    }

    #[tokio::test]
    async fn test_save_persists_changes() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let mut manager = ConfigManager::init_at(&config_path).await.unwrap();

        manager.config_mut().settings.region = "eu-west-1".to_string();
        manager.save().await.unwrap();

        let loaded = ConfigManager::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.config().settings.region, "eu-west-1");
        assert!(!config_path.with_extension("toml.tmp").exists());
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "version = \"1.0\"\n\n[settings]\nbatch_size = 500\n",
        )
        .unwrap();

        let result = ConfigManager::load_from(&config_path).await;
        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::BatchSize(500)))
        ));
    }

    #[tokio::test]
    async fn test_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "version = ").unwrap();

        let result = ConfigManager::load_from(&config_path).await;
        assert!(matches!(result, Err(ConfigError::TomlDe(_))));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_config_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        ConfigManager::init_at(&config_path).await.unwrap();

        let mode = std::fs::metadata(&config_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
