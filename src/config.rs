//! Configuration for freqsched.
//!
//! Loaded from an explicit path, ./freqsched.yml, or
//! ~/.config/freqsched/freqsched.yml, falling back to defaults.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scheduler::{DEFAULT_QUOTA_PER_CLASS, MAX_OFFSETS_PER_CLASS};
use crate::store::StoreLimits;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub schedules: SchedulesConfig,
    pub session: SessionConfig,
}

/// Admission limits for calendar schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchedulesConfig {
    /// Schedules allowed per frequency class (1..=10).
    pub quota_per_class: usize,

    /// Shortest interval step in minutes; 0 only rejects zero steps.
    pub min_interval_minutes: u32,
}

impl Default for SchedulesConfig {
    fn default() -> Self {
        Self {
            quota_per_class: DEFAULT_QUOTA_PER_CLASS,
            min_interval_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// JSONL file holding the current wizard session.
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("freqsched")
                .join("session.jsonl"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            schedules: SchedulesConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try project config
        let project_config = PathBuf::from(format!("{}.yml", project_name));
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", project_config.display(), e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let quota = self.schedules.quota_per_class;
        if quota == 0 || quota > MAX_OFFSETS_PER_CLASS {
            eyre::bail!(
                "schedules.quota-per-class must be between 1 and {}, got {}",
                MAX_OFFSETS_PER_CLASS,
                quota
            );
        }
        Ok(())
    }

    /// Store limits derived from the schedule settings.
    pub fn limits(&self) -> StoreLimits {
        StoreLimits {
            quota_per_class: self.schedules.quota_per_class,
            min_interval_minutes: self.schedules.min_interval_minutes,
        }
    }
}
