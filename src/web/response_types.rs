//! # Web API Response Types
//!
//! The uniform `{success, data, message}` envelope and the error type that
//! renders failures into it.

use crate::errors::{ErrorKind, FieldError, StudentError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

/// Message carried by every successful response
pub const NO_ERROR_MESSAGE: &str = "No error Recorded";

/// Message carried by server-side failures
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Response envelope used by every `/student` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseWrapper<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ResponseWrapper<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: NO_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn failure(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            message: message.into(),
        }
    }
}

/// Failures surfaced by handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, query string or path parameter
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Student(#[from] StudentError),

    /// Handler exceeded the configured request timeout
    #[error("Request timed out")]
    Timeout,

    /// Failure raised by a middleware layer
    #[error("Middleware failure: {0}")]
    Unhandled(String),
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Student(StudentError::ValidationFailed { errors })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Student(err) => match err.kind() {
                ErrorKind::NotFound
                | ErrorKind::DeletionFailed
                | ErrorKind::UpdateFailed
                | ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
                ErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let envelope: ResponseWrapper<serde_json::Value> = match &self {
            Self::Student(StudentError::ValidationFailed { errors }) => {
                let details = serde_json::to_value(errors).unwrap_or(serde_json::Value::Null);
                ResponseWrapper::failure(Some(details), self.to_string())
            }
            _ if status.is_server_error() => {
                error!(status = status.as_u16(), error = %self, "Request failed");
                ResponseWrapper::failure(None, UNEXPECTED_ERROR_MESSAGE)
            }
            _ => {
                warn!(status = status.as_u16(), error = %self, "Request rejected");
                ResponseWrapper::failure(None, self.to_string())
            }
        };

        (status, Json(envelope)).into_response()
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Health of one dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: String,
    pub backend: String,
    pub message: Option<String>,
}

/// Readiness response with per-dependency detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}
