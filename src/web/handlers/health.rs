//! # Health Check Handlers
//!
//! Liveness and readiness endpoints for monitoring and load balancing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::web::response_types::{ComponentHealth, HealthResponse, ReadinessResponse};
use crate::web::state::AppState;

/// Basic health check endpoint: GET /health
///
/// Returns OK whenever the process is serving requests.
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Readiness probe: GET /ready
///
/// Checks the record store and the cache. Responds 503 when either fails.
pub async fn readiness_probe(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    debug!("Performing readiness probe");

    let mut checks = BTreeMap::new();

    let store = state.store();
    let store_check = match store.health_check().await {
        Ok(()) => healthy(store.backend_name()),
        Err(e) => unhealthy(store.backend_name(), e.to_string()),
    };
    checks.insert("store".to_string(), store_check);

    let cache_check = match state.cache.health_check().await {
        Ok(true) => healthy(state.cache.provider_name()),
        Ok(false) => unhealthy(state.cache.provider_name(), "health check failed".to_string()),
        Err(e) => unhealthy(state.cache.provider_name(), e.to_string()),
    };
    checks.insert("cache".to_string(), cache_check);

    let ready = checks.values().all(|c| c.status == "healthy");
    if !ready {
        warn!(?checks, "Readiness probe failed");
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    };
    (status, Json(body))
}

fn healthy(backend: &str) -> ComponentHealth {
    ComponentHealth {
        status: "healthy".to_string(),
        backend: backend.to_string(),
        message: None,
    }
}

fn unhealthy(backend: &str, message: String) -> ComponentHealth {
    ComponentHealth {
        status: "unhealthy".to_string(),
        backend: backend.to_string(),
        message: Some(message),
    }
}
