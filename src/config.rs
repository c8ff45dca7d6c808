//! Configuration management for heartline
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/heartline/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub animation: AnimationOptions,
    pub splash: SplashOptions,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("heartline");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`, or write defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!(?path, "wrote default config");
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Blush,
    Midnight,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Blush => "Blush",
            ThemeName::Midnight => "Midnight",
            ThemeName::Transparent => "Transparent",
        }
    }
}

/// Animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Multiplier on the animation clock; 1.0 is real time
    pub time_scale: f64,
    /// Poll/redraw interval of the UI loop
    pub frame_interval_ms: u64,
    /// Skip the perpetual decorative loops
    pub reduce_motion: bool,
    /// Width of the tab indicator, in cells
    pub indicator_width: u16,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            frame_interval_ms: 16,
            reduce_motion: false,
            indicator_width: 6,
        }
    }
}

impl AnimationOptions {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Splash screen timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashOptions {
    pub duration_ms: u64,
}

impl Default for SplashOptions {
    fn default() -> Self {
        Self { duration_ms: 1800 }
    }
}

impl SplashOptions {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
