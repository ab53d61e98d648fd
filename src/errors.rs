//! # Student Record Errors
//!
//! One error type for the service and facade layers. Callers branch on
//! [`StudentError::kind`] rather than on variants, so the transport layer
//! can map failures to status codes without knowing where they came from.

use crate::cache::CacheError;
use crate::database::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single request field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Failure classification used at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DeletionFailed,
    UpdateFailed,
    ValidationFailed,
    BackendUnavailable,
    Internal,
}

#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Student record not found")]
    NotFound { id: i64 },

    #[error("Student Record is not deleted or not found")]
    DeletionFailed { id: i64 },

    #[error("Student Record is not updated or not found")]
    UpdateFailed { id: i64 },

    #[error("Validation failed: {}", join_field_errors(.errors))]
    ValidationFailed { errors: Vec<FieldError> },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl StudentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DeletionFailed { .. } => ErrorKind::DeletionFailed,
            Self::UpdateFailed { .. } => ErrorKind::UpdateFailed,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::Store(err) if err.is_unavailable() => ErrorKind::BackendUnavailable,
            Self::Cache(err) if err.is_unavailable() => ErrorKind::BackendUnavailable,
            Self::Store(_) | Self::Cache(_) => ErrorKind::Internal,
        }
    }

    /// True when the caller caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotFound
                | ErrorKind::DeletionFailed
                | ErrorKind::UpdateFailed
                | ErrorKind::ValidationFailed
        )
    }
}

pub type StudentResult<T> = Result<T, StudentError>;
