//! Configuration management for Waypoint.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{Result, WaypointError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Waypoint.
///
/// ## Example Configuration File (waypoint.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [helper]
/// command = "waypoint-helper"
///
/// [resolution]
/// follow_shortcuts = true
///
/// [ui]
/// reserved_margin = 4
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Enumeration helper process settings
    pub helper: HelperConfig,

    /// Shortcut and virtual-directory resolution settings
    pub resolution: ResolutionConfig,

    /// UI settings
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            general: GeneralConfig::default(),
            helper: HelperConfig::default(),
            resolution: ResolutionConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
        }
    }
}

/// Enumeration helper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Command used to invoke the helper process.
    ///
    /// Resolved through `PATH` unless given as an absolute path.
    pub command: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        HelperConfig {
            command: "waypoint-helper".to_string(),
        }
    }
}

/// Resolution policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Follow shortcut files and virtual-directory markers to their
    /// targets. Turn off to operate on the shortcut files themselves.
    ///
    /// Toggleable at runtime; takes effect on the next resolution attempt.
    pub follow_shortcuts: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        ResolutionConfig {
            follow_shortcuts: true,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Columns reserved next to the breadcrumb when computing the width
    /// available for the rendered path
    pub reserved_margin: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { reserved_margin: 4 }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| WaypointError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents =
            toml::to_string_pretty(self).map_err(|e| WaypointError::ConfigError {
                reason: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from("", "", "waypoint").ok_or_else(|| WaypointError::ConfigError {
                reason: "Could not determine config directory".to_string(),
            })?;

        Ok(dirs.config_dir().join("waypoint.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.resolution.follow_shortcuts);
        assert_eq!(config.helper.command, "waypoint-helper");
        assert_eq!(config.ui.reserved_margin, 4);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.resolution.follow_shortcuts = false;
        config.helper.command = "/opt/helpers/enum".to_string();

        config.save_to(&config_path).unwrap();
        let loaded = Config::load_from(&config_path).unwrap();

        assert!(!loaded.resolution.follow_shortcuts);
        assert_eq!(loaded.helper.command, "/opt/helpers/enum");
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert!(config.resolution.follow_shortcuts); // Default value
    }

    #[test]
    fn test_load_partial() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[resolution]\nfollow_shortcuts = false\n").unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert!(!loaded.resolution.follow_shortcuts);
        assert_eq!(loaded.helper.command, "waypoint-helper"); // Default value
    }

    #[test]
    fn test_load_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "not valid toml [").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, WaypointError::ConfigError { .. }));
    }
}
