//! Error types and handling for the `AeroGuard` service

use thiserror::Error;

/// Main error type for the `AeroGuard` service
#[derive(Error, Debug)]
pub enum AeroGuardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream AQI service communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors (unsupported locations, bad parameters)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Reading cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl AeroGuardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AeroGuardError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AeroGuardError::Api { .. } => {
                "Unable to reach the air quality service. Showing fallback data.".to_string()
            }
            AeroGuardError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AeroGuardError::Cache { .. } => {
                "Reading cache operation failed. You may need to clear the cache directory."
                    .to_string()
            }
            AeroGuardError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            AeroGuardError::General { message } => message.clone(),
        }
    }
}
