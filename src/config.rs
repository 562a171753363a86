//! Configuration management for `AeroGuard`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AeroGuardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `AeroGuard` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeroGuardConfig {
    /// Upstream AQI service configuration
    pub upstream: UpstreamConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream AQI service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Access token for the AQI service ("demo" works for testing)
    #[serde(default = "default_upstream_token")]
    pub token: String,
    /// Base URL for the AQI service
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL for current readings in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Debounce window for location switches, in milliseconds
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
    /// Default forecast horizon in hours
    #[serde(default = "default_forecast_hours")]
    pub forecast_hours: u32,
    /// Directory of reading files consumed at startup
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_upstream_token() -> String {
    "demo".to_string()
}

fn default_upstream_base_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_upstream_timeout() -> u32 {
    10
}

fn default_cache_ttl() -> u32 {
    15
}

fn default_cache_location() -> String {
    "~/.cache/aeroguard".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_debounce() -> u64 {
    300
}

fn default_forecast_hours() -> u32 {
    6
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AeroGuardConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig {
                token: default_upstream_token(),
                base_url: default_upstream_base_url(),
                timeout_seconds: default_upstream_timeout(),
            },
            cache: CacheConfig {
                ttl_minutes: default_cache_ttl(),
                location: default_cache_location(),
            },
            server: ServerConfig {
                port: default_server_port(),
                debounce_ms: default_debounce(),
                forecast_hours: default_forecast_hours(),
                uploads_dir: default_uploads_dir(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl AeroGuardConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with AEROGUARD_ prefix
        builder = builder.add_source(
            Environment::with_prefix("AEROGUARD")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AeroGuardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aeroguard").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.upstream.token.is_empty() {
            self.upstream.token = default_upstream_token();
        }
        if self.upstream.base_url.is_empty() {
            self.upstream.base_url = default_upstream_base_url();
        }
        if self.upstream.timeout_seconds == 0 {
            self.upstream.timeout_seconds = default_upstream_timeout();
        }
        if self.cache.ttl_minutes == 0 {
            self.cache.ttl_minutes = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.forecast_hours == 0 {
            self.server.forecast_hours = default_forecast_hours();
        }
        if self.server.uploads_dir.is_empty() {
            self.server.uploads_dir = default_uploads_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.upstream.timeout_seconds > 120 {
            return Err(
                AeroGuardError::config("Upstream timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.cache.ttl_minutes > 1440 {
            return Err(
                AeroGuardError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into(),
            );
        }

        if self.server.debounce_ms > 10_000 {
            return Err(
                AeroGuardError::config("Debounce window cannot exceed 10000 ms").into(),
            );
        }

        if self.server.forecast_hours > 24 {
            return Err(
                AeroGuardError::config("Default forecast horizon cannot exceed 24 hours").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AeroGuardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AeroGuardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(AeroGuardError::config(
                "Upstream base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let aeroguard_config_dir = config_dir.join("aeroguard");
            std::fs::create_dir_all(&aeroguard_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    aeroguard_config_dir.display()
                )
            })?;
            Ok(aeroguard_config_dir)
        } else {
            Err(AeroGuardError::config("Unable to determine config directory").into())
        }
    }
}
