//! Configuration file loading.
//!
//! Reads `<config_dir>/foliotui/config.toml`. A missing file means defaults;
//! a present but broken file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{contact, performance};
use crate::performance::Quality;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub performance: PerformanceSettings,
}

/// Where contact submissions go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// HTTP endpoint receiving the JSON payload. None means dry run.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Quality tuning knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSettings {
    /// Frame rate below which quality is lowered (default: 30).
    #[serde(default = "default_min_fps")]
    pub min_fps: u32,
    /// Length of one FPS sampling window in milliseconds (default: 1000).
    #[serde(default = "default_sample_window_ms")]
    pub sample_window_ms: u64,
    /// Disables header animation.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Starting tier, overriding device detection.
    #[serde(default)]
    pub quality: Option<Quality>,
}

fn default_timeout_seconds() -> u64 {
    contact::TIMEOUT_SECONDS
}

fn default_min_fps() -> u32 {
    performance::MIN_FPS
}

fn default_sample_window_ms() -> u64 {
    performance::SAMPLE_WINDOW_MS
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            min_fps: default_min_fps(),
            sample_window_ms: default_sample_window_ms(),
            reduced_motion: false,
            quality: None,
        }
    }
}

impl Config {
    /// Returns the default path to the configuration file.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("foliotui").join("config.toml")
    }

    /// Loads from `path`, or from the default location when None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The endpoint, when set, is an http(s) URL
    /// - Timeouts and sampling windows are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.contact.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    message: format!("Contact endpoint '{endpoint}' must be an http(s) URL"),
                });
            }
        }

        if self.contact.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "contact.timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.performance.sample_window_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "performance.sample_window_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.performance.min_fps, 30);
        assert_eq!(config.performance.sample_window_ms, 1000);
        assert_eq!(config.contact.endpoint, None);
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[contact]
endpoint = "https://example.com/api/contact"
timeout_seconds = 5

[performance]
min_fps = 24
reduced_motion = true
quality = "medium"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(
            config.contact.endpoint.as_deref(),
            Some("https://example.com/api/contact")
        );
        assert_eq!(config.contact.timeout_seconds, 5);
        assert_eq!(config.performance.min_fps, 24);
        assert_eq!(config.performance.sample_window_ms, 1000);
        assert!(config.performance.reduced_motion);
        assert_eq!(config.performance.quality, Some(Quality::Medium));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[contact\nendpoint = ").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[contact]\nendpoint = \"ftp://example.com\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_rejects_zero_window() {
        let mut config = Config::default();
        config.performance.sample_window_ms = 0;
        assert!(config.validate().is_err());
    }
}
