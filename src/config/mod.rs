//! Configuration module for stylebook
//!
//! Manages where guideline files and browsing state live, plus a few display
//! defaults. Configuration is stored in the user's config directory
//! (`~/.config/stylebook/config.toml` on Linux) and written with defaults on
//! first run.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of tags shown on a card when not configured
pub const DEFAULT_CARD_TAG_LIMIT: usize = 4;

const APP_DIR: &str = "stylebook";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StylebookConfig {
    /// Directory holding the guideline JSON files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the preference database
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Dataset used when no preference has been persisted yet
    #[serde(default)]
    pub default_dataset: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Maximum number of tags shown on a style card
    #[serde(default = "default_card_tag_limit")]
    pub card_tag_limit: usize,
}

const fn default_card_tag_limit() -> usize {
    DEFAULT_CARD_TAG_LIMIT
}

impl Default for StylebookConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            state_dir: None,
            default_dataset: None,
            quiet: false,
            card_tag_limit: DEFAULT_CARD_TAG_LIMIT,
        }
    }
}

/// Keys accepted by `config get` and `config set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ConfigKey {
    DataDir,
    StateDir,
    DefaultDataset,
    Quiet,
    CardTagLimit,
}

impl ConfigKey {
    pub const ALL: [Self; 5] = [
        Self::DataDir,
        Self::StateDir,
        Self::DefaultDataset,
        Self::Quiet,
        Self::CardTagLimit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataDir => "data_dir",
            Self::StateDir => "state_dir",
            Self::DefaultDataset => "default_dataset",
            Self::Quiet => "quiet",
            Self::CardTagLimit => "card_tag_limit",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| {
                let available: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                ConfigError::Message(format!(
                    "Unknown configuration key: '{s}'. Available keys: {}",
                    available.join(", ")
                ))
            })
    }
}

impl StylebookConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Directory to read guideline files from
    ///
    /// Falls back to `<data dir>/stylebook/datasets`, or `./data` when the
    /// platform has no data directory.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map_or_else(|| PathBuf::from("data"), |dir| dir.join(APP_DIR).join("datasets"))
        })
    }

    /// Directory holding persisted preferences
    ///
    /// `None` when neither the config nor the platform provide one; the
    /// session then keeps preferences in memory only.
    #[must_use]
    pub fn resolved_state_dir(&self) -> Option<PathBuf> {
        self.state_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("state")))
    }

    /// Current value of a key, formatted for display
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> String {
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
        match key {
            ConfigKey::DataDir => path(&self.data_dir),
            ConfigKey::StateDir => path(&self.state_dir),
            ConfigKey::DefaultDataset => self.default_dataset.clone().unwrap_or_default(),
            ConfigKey::Quiet => self.quiet.to_string(),
            ConfigKey::CardTagLimit => self.card_tag_limit.to_string(),
        }
    }

    /// Set a key from its string form; an empty value unsets optional keys
    ///
    /// Does not save.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the value cannot be parsed for the key.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional_path = |v: &str| (!v.is_empty()).then(|| PathBuf::from(v));
        match key {
            ConfigKey::DataDir => self.data_dir = optional_path(value),
            ConfigKey::StateDir => self.state_dir = optional_path(value),
            ConfigKey::DefaultDataset => {
                self.default_dataset = (!value.is_empty()).then(|| value.to_string());
            }
            ConfigKey::Quiet => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for quiet: '{value}'. Use true or false"))
                })?;
            }
            ConfigKey::CardTagLimit => {
                self.card_tag_limit = value.parse().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for card_tag_limit: '{value}'. Use a non-negative integer"
                    ))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StylebookConfig::default();
        assert!(config.data_dir.is_none());
        assert!(config.default_dataset.is_none());
        assert!(!config.quiet);
        assert_eq!(config.card_tag_limit, DEFAULT_CARD_TAG_LIMIT);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = StylebookConfig::load_from(&path).unwrap();
        assert_eq!(config, StylebookConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = StylebookConfig::default();
        config.set(ConfigKey::DataDir, "/srv/guidelines").unwrap();
        config.set(ConfigKey::CardTagLimit, "5").unwrap();
        config.set(ConfigKey::Quiet, "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = StylebookConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.resolved_data_dir(), PathBuf::from("/srv/guidelines"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_dataset = \"bjcp-2015-mead\"\n").unwrap();

        let loaded = StylebookConfig::load_from(&path).unwrap();
        assert_eq!(loaded.default_dataset.as_deref(), Some("bjcp-2015-mead"));
        assert_eq!(loaded.card_tag_limit, DEFAULT_CARD_TAG_LIMIT);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = StylebookConfig::default();
        assert!(config.set(ConfigKey::Quiet, "sometimes").is_err());
        assert!(config.set(ConfigKey::CardTagLimit, "-1").is_err());
        assert_eq!(config, StylebookConfig::default());
    }

    #[test]
    fn test_empty_value_unsets() {
        let mut config = StylebookConfig::default();
        config.set(ConfigKey::StateDir, "/tmp/state").unwrap();
        config.set(ConfigKey::StateDir, "").unwrap();
        assert!(config.state_dir.is_none());
        assert_eq!(config.get(ConfigKey::StateDir), "");
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("card_tag_limit".parse::<ConfigKey>().unwrap(), ConfigKey::CardTagLimit);
        let err = "colour".parse::<ConfigKey>().unwrap_err();
        assert!(err.to_string().contains("data_dir"));
    }
}
