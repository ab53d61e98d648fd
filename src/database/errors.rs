//! Record store error types

use thiserror::Error;

/// Failures reported by a [`StudentStore`](super::StudentStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted or closed, I/O, TLS, protocol)
    #[error("Record store unavailable during {operation}: {message}")]
    Unavailable { operation: String, message: String },

    /// The store answered but refused the operation
    #[error("Record store rejected {operation}: {message}")]
    Rejected { operation: String, message: String },
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Classify an sqlx failure for `operation`
    pub fn from_sqlx(operation: &str, err: sqlx::Error) -> Self {
        let message = err.to_string();
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed => Self::Unavailable {
                operation: operation.to_string(),
                message,
            },
            _ => Self::Rejected {
                operation: operation.to_string(),
                message,
            },
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
