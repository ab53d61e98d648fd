//! Cache error types

use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to connect to cache backend
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    /// Failed to serialize or deserialize cache value
    #[error("Cache serialization error: {0}")]
    SerializationError(String),

    /// Cache operation timed out
    #[error("Cache operation timed out: {0}")]
    Timeout(String),

    /// Generic backend error
    #[error("Cache backend error: {0}")]
    BackendError(String),

    /// Key holds a value of a different shape (bucket vs list)
    #[error("Cache key '{key}' holds the wrong kind of value")]
    WrongType { key: String },

    /// List index past the end of the list
    #[error("Index {index} out of range for cache list '{key}'")]
    IndexOutOfRange { key: String, index: usize },

    /// Backend cannot be built from the given configuration
    #[error("Cache configuration error: {0}")]
    ConfigurationError(String),
}

impl CacheError {
    /// Whether this failure means the backend could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError(_) | Self::Timeout(_) | Self::BackendError(_)
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerializationError(err.to_string())
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
