//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::input::{DEFAULT_INITIAL_DELAY, DEFAULT_REPEAT_INTERVAL};
use crate::preferences::{PreferenceKey, Preferences, PreferencesSource};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "SOFTKEY_CONFIG_DIR";

/// Backspace repeat timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before backspace starts repeating, in milliseconds
    #[serde(default = "default_backspace_delay_ms")]
    pub backspace_delay_ms: u64,
    /// Interval between repeated deletes, in milliseconds
    #[serde(default = "default_backspace_repeat_ms")]
    pub backspace_repeat_ms: u64,
}

/// Default backspace delay (500ms)
fn default_backspace_delay_ms() -> u64 {
    u64::try_from(DEFAULT_INITIAL_DELAY.as_millis()).unwrap_or(500)
}

/// Default backspace repeat interval (70ms)
fn default_backspace_repeat_ms() -> u64 {
    u64::try_from(DEFAULT_REPEAT_INTERVAL.as_millis()).unwrap_or(70)
}

impl TimingConfig {
    /// Initial backspace delay.
    #[must_use]
    pub const fn backspace_delay(&self) -> Duration {
        Duration::from_millis(self.backspace_delay_ms)
    }

    /// Backspace repeat interval.
    #[must_use]
    pub const fn backspace_repeat(&self) -> Duration {
        Duration::from_millis(self.backspace_repeat_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            backspace_delay_ms: default_backspace_delay_ms(),
            backspace_repeat_ms: default_backspace_repeat_ms(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Softkey/config.toml`
/// - macOS: `~/Library/Application Support/Softkey/config.toml`
/// - Windows: `%APPDATA%\Softkey\config.toml`
///
/// `SOFTKEY_CONFIG_DIR` replaces the directory on every platform.
///
/// # Validation
///
/// - `backspace_repeat_ms` must be greater than zero
/// - `backspace_delay_ms` must be at least `backspace_repeat_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Input preferences
    #[serde(default)]
    pub input: Preferences,
    /// Backspace timing
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Honors `SOFTKEY_CONFIG_DIR`, otherwise:
    /// - Linux: `~/.config/Softkey/`
    /// - macOS: `~/Library/Application Support/Softkey/`
    /// - Windows: `%APPDATA%\Softkey\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Softkey");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using atomic write.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.timing.backspace_repeat_ms == 0 {
            anyhow::bail!("backspace_repeat_ms must be greater than zero");
        }

        if self.timing.backspace_delay_ms < self.timing.backspace_repeat_ms {
            anyhow::bail!(
                "backspace_delay_ms ({}) must be at least backspace_repeat_ms ({})",
                self.timing.backspace_delay_ms,
                self.timing.backspace_repeat_ms
            );
        }

        Ok(())
    }

    /// Sets a boolean input preference.
    pub fn set_preference(&mut self, key: PreferenceKey, value: bool) {
        self.input.set(key, value);
    }
}

impl PreferencesSource for Config {
    fn get_bool(&self, key: PreferenceKey) -> bool {
        self.input.get_bool(key)
    }
}
