//! Configuration management for tripdeck.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "tripdeck";

/// Default trip plan file name.
const TRIP_FILE_NAME: &str = "trip.toml";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRIPDECK_`)
/// 2. TOML config file at `~/.config/tripdeck/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trip plan configuration.
    pub trip: TripConfig,
    /// Session configuration.
    pub session: SessionConfig,
}

/// Trip-plan-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Path to the trip plan TOML file.
    /// Defaults to `~/.config/tripdeck/trip.toml`; the built-in sample plan
    /// is used when the file does not exist.
    pub plan_path: Option<PathBuf>,
}

/// Session-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of photo attachments per session.
    pub max_attachments: usize,
    /// Maximum size of a single photo attachment in bytes.
    pub max_attachment_bytes: u64,
    /// Directory in which the session spool directory is created.
    /// Defaults to the system temporary directory.
    pub spool_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attachments: 256,
            max_attachment_bytes: 32 * 1024 * 1024, // 32 MiB
            spool_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `TRIPDECK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("TRIPDECK_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default trip plan file path.
    #[must_use]
    pub fn default_trip_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(TRIP_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.session.max_attachments == 0 {
            return Err(Error::ConfigValidation {
                message: "max_attachments must be greater than 0".to_string(),
            });
        }

        if self.session.max_attachment_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_attachment_bytes must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the trip plan path, resolving defaults if not set.
    #[must_use]
    pub fn trip_path(&self) -> PathBuf {
        self.trip
            .plan_path
            .clone()
            .unwrap_or_else(Self::default_trip_path)
    }
}
