use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{DEFAULT_RETRY_THREAD_NAME, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::player::FixedDisplay;
use crate::sampler::{DimensionGate, RetryController, RetryHandle};
use crate::utils::SResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub stream: StreamConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default)]
    pub live: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default)]
    pub dimension_gate: DimensionGate,

    #[serde(default = "default_true")]
    pub retry_on_failure: bool,

    #[serde(default = "default_retry_thread_name")]
    pub retry_thread_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_screen_width")]
    pub width: u32,

    #[serde(default = "default_screen_height")]
    pub height: u32,
}

impl SamplerConfig {
    /// Load from the user config directory, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No telemetry config found, using defaults");
            let config = SamplerConfig::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading telemetry config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: SamplerConfig =
            toml::from_str(&contents).context("Failed to parse config file")?;
        info!("Telemetry config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Telemetry config saved to {:?}", path);
        Ok(())
    }

    /// Display to report when the host has no display subsystem of its own
    pub fn fixed_display(&self) -> FixedDisplay {
        FixedDisplay::new(self.display.width, self.display.height)
    }

    /// Start the retry context, or `None` when retries are disabled
    pub fn spawn_retry_context(&self) -> SResult<Option<RetryHandle>> {
        if !self.sampling.retry_on_failure {
            return Ok(None);
        }
        RetryController::spawn(&self.sampling.retry_thread_name).map(Some)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("reel").join("telemetry.toml"))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: default_version(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            dimension_gate: DimensionGate::default(),
            retry_on_failure: default_true(),
            retry_thread_name: default_retry_thread_name(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
        }
    }
}

// Default value functions
fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_true() -> bool { true }
fn default_retry_thread_name() -> String { DEFAULT_RETRY_THREAD_NAME.to_string() }
fn default_screen_width() -> u32 { DEFAULT_SCREEN_WIDTH }
fn default_screen_height() -> u32 { DEFAULT_SCREEN_HEIGHT }
