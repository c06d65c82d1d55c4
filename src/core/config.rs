//! Configuration management for Studiocycle.
//!
//! Handles loading and saving configuration from TOML files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::SQM_PER_ATHLETE;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Generation service settings
    pub ai: AiConfig,

    /// Planning defaults
    pub planning: PlanningConfig,

    /// Coach profile
    pub profile: ProfileConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Workspace file location (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
}

/// Generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model to use
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Planning defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Athletes per class the workouts are designed for
    pub class_size: u32,

    /// Floor area per athlete used to derive studio capacity
    pub sqm_per_athlete: f64,

    /// Default cycle name
    pub cycle_name: String,

    /// Default cycle length in weeks
    pub cycle_weeks: u32,
}

/// Coach profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub role: String,
    pub email: String,
    pub gym_name: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.studiocycle.toml` in current directory
    /// 2. `~/.config/studiocycle/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        // Try local config first
        let local_config = PathBuf::from(".studiocycle.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try global config
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        // Return defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the global config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to_file(&config_path)
    }

    /// Save configuration to a specific file.
    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("studiocycle"))
    }

    /// Get the global config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            class_size: 15,
            sqm_per_athlete: SQM_PER_ATHLETE,
            cycle_name: "Winter Hyrox Prep".to_string(),
            cycle_weeks: 8,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            role: "Head Coach".to_string(),
            email: "coach@functionalgym.com".to_string(),
            gym_name: "Functional HQ".to_string(),
        }
    }
}
