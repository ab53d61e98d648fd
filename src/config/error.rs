//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read configuration file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax error or a value of the wrong shape
    #[error("Invalid configuration in '{origin}': {message}")]
    Parse { origin: String, message: String },

    /// `${VAR}` placeholder that could not be substituted
    #[error("Cannot substitute '${{{variable}}}': {reason}")]
    Substitution { variable: String, reason: String },

    /// Parsed but out of range
    #[error("Configuration rejected: {0}")]
    Invalid(String),
}

impl ConfigurationError {
    pub(crate) fn substitution(variable: &str, reason: impl Into<String>) -> Self {
        Self::Substitution {
            variable: variable.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigurationError>;
