//! Simple configuration persistence for HOP
//!
//! Stores the repeat window and per-direction jump intervals.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hop_repeat::DEFAULT_REPEAT_WINDOW;
use thiserror::Error;

/// Default seek distance per jump step, in seconds
pub const DEFAULT_JUMP_SECS: f64 = 15.0;

/// Invalid config entries (the default is kept for that key)
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid number for {key}: {value:?}")]
    InvalidNumber { key: String, value: String },
    #[error("{0} must be greater than zero")]
    NotPositive(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Pause after the last press that ends a repeat gesture
    pub repeat_window: Duration,
    /// Seconds per forward jump step
    pub jump_forward_secs: f64,
    /// Seconds per backward jump step
    pub jump_backward_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repeat_window: DEFAULT_REPEAT_WINDOW,
            jump_forward_secs: DEFAULT_JUMP_SECS,
            jump_backward_secs: DEFAULT_JUMP_SECS,
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be read.
    pub fn load() -> Self {
        Self::load_or_default(&Self::config_path())
    }

    /// Load config from `path`, falling back to defaults if it can't be read
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save config to the default location
    pub fn save(&self) -> io::Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.serialize())
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hop")
            .join("config.txt")
    }

    /// Parse config from simple key=value format, keeping defaults for bad entries
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = config.apply(key.trim(), value.trim()) {
                    tracing::warn!("Ignoring config entry: {}", e);
                }
            }
        }

        config
    }

    /// Apply one key=value entry
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "repeat_window_ms" => {
                let ms: u64 = value.parse().map_err(|_| invalid(key, value))?;
                if ms == 0 {
                    return Err(ConfigError::NotPositive(key.to_string()));
                }
                self.repeat_window = Duration::from_millis(ms);
            }
            "jump_forward_secs" => self.jump_forward_secs = positive_secs(key, value)?,
            "jump_backward_secs" => self.jump_backward_secs = positive_secs(key, value)?,
            _ => {} // Ignore unknown keys
        }
        Ok(())
    }

    /// Serialize config to simple key=value format
    fn serialize(&self) -> String {
        let lines = [
            "# HOP Configuration".to_string(),
            format!("repeat_window_ms={}", self.repeat_window.as_millis()),
            format!("jump_forward_secs={}", self.jump_forward_secs),
            format!("jump_backward_secs={}", self.jump_backward_secs),
        ];
        lines.join("\n")
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn positive_secs(key: &str, value: &str) -> Result<f64, ConfigError> {
    let secs: f64 = value.parse().map_err(|_| invalid(key, value))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::NotPositive(key.to_string()));
    }
    Ok(secs)
}
