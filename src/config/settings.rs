//! Application settings loaded from a TOML file.
//!
//! Every key is optional. A missing file means "use the defaults", and the
//! `DATABASE_URL` environment variable takes precedence over the file.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "SPENDING_TRACKER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level settings, mirroring the sections of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `SeaORM` connection string
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })
}

/// Loads settings from `path`.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from `$SPENDING_TRACKER_CONFIG` (default `./config.toml`) and applies
/// the `DATABASE_URL` override.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;

    if let Ok(url) = std::env::var("DATABASE_URL") {
        tracing::debug!("DATABASE_URL overrides the configured database url");
        config.database.url = url;
    }
    Ok(config)
}
