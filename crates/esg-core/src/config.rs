//! TOML-based engine configuration.
//!
//! Stores scoring and presentation preferences:
//! - Aggregation mode
//! - Default report title
//! - Export format
//! - Log level
//!
//! Configuration is read from `$ESG_SCORE_CONFIG` if set, otherwise
//! `<config_dir>/esg-score/config.toml`. A missing file means defaults;
//! nothing is written unless [`EngineConfig::save_to`] is called.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregate::AggregationMode;
use crate::error::ConfigError;
use crate::export::ExportFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ESG_SCORE_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: AggregationMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Overrides the catalog title when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `esg_core=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl EngineConfig {
    fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Resolved config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("esg-score").join("config.toml"))
    }

    /// Load from the resolved location, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };

        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Only updates memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "scoring.mode" => self.scoring.mode = value.parse().map_err(ConfigError::ParseFailed)?,
            "report.title" => {
                self.report.title = (!value.is_empty()).then(|| value.to_string());
            }
            "export.format" => self.export.format = value.parse().map_err(ConfigError::ParseFailed)?,
            "logging.level" => self.logging.level = value.to_string(),
            _ => return Err(ConfigError::ParseFailed(format!("unknown config key: {key}"))),
        }
        Ok(())
    }

    /// Every leaf key with its current value, in file order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        ["scoring.mode", "report.title", "export.format", "logging.level"]
            .into_iter()
            .map(|key| (key, self.get(key).unwrap_or_default()))
            .collect()
    }
}
