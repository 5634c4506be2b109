//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages the user-editable settings for the virtual drive. Loads and
//! saves settings as TOML from the proper cross-platform config path using
//! the [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::model::ui_state::ViewMode;
use crate::model::upload::DEFAULT_MAX_FILE_SIZE;

/// Simulated-upload knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Size gate for staged files, in bytes.
    pub max_file_size: u64,

    /// Shared progress tick for all in-flight uploads.
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            tick_interval: Duration::from_millis(100),
        }
    }
}

/// Presentation preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Entry area rendering on startup.
    pub default_view: ViewMode,

    /// How long transient notices stay on screen.
    #[serde(with = "humantime_serde")]
    pub notification_timeout: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Grid,
            notification_timeout: Duration::from_secs(4),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or
    /// returns defaults (creating the file for next time).
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path).await?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(&path, toml_str).await?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "stash", "Stash")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Returns the config directory, if you need to display or manipulate it.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "stash", "Stash")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.upload.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parsed.upload.tick_interval, Duration::from_millis(100));
        assert_eq!(parsed.ui.default_view, ViewMode::Grid);
        assert_eq!(parsed.ui.notification_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.upload.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parsed.ui.default_view, ViewMode::Grid);
    }

    #[test]
    fn test_partial_overrides_apply() {
        let parsed: Config = toml::from_str(
            "[ui]\ndefault_view = \"list\"\nnotification_timeout = \"2s\"\n",
        )
        .unwrap();
        assert_eq!(parsed.ui.default_view, ViewMode::List);
        assert_eq!(parsed.ui.notification_timeout, Duration::from_secs(2));
        assert_eq!(parsed.upload.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }
}
