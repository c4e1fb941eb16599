//! plotquiz configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::answer::TrimMode;
use crate::content::Registry;

/// Main plotquiz configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Terminal poll interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,

    /// Topic selected when the dashboard opens
    #[serde(rename = "start-topic")]
    pub start_topic: Option<String>,

    /// Topics file replacing the built-in topics
    #[serde(rename = "content-file")]
    pub content_file: Option<PathBuf>,

    /// Answer checking
    pub answers: AnswersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            tick_rate_ms: 250,
            start_topic: None,
            content_file: None,
            answers: AnswersConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .plotquiz.yml
        let local_config = PathBuf::from(".plotquiz.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/plotquiz/plotquiz.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("plotquiz").join("plotquiz.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed: the full load reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from(".plotquiz.yml")];
                if let Some(config_dir) = dirs::config_dir() {
                    paths.push(config_dir.join("plotquiz").join("plotquiz.yml"));
                }
                paths
            }
        };

        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Build the topic registry this configuration asks for
    pub fn registry(&self) -> Result<Registry> {
        match &self.content_file {
            Some(path) => Registry::load(path).context(format!("Failed to load topics from {}", path.display())),
            None => Registry::builtin().context("Failed to load built-in topics"),
        }
    }
}

/// Answer checking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswersConfig {
    /// Which whitespace to ignore (leading, both)
    pub trim: TrimMode,
}
