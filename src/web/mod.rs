//! # Web API Module
//!
//! Axum-based REST API for student records.
//!
//! - [`routes`] - HTTP route definitions
//! - [`handlers`] - request handlers for students and health
//! - [`middleware`] - request id tagging
//! - [`state`] - shared application state
//! - [`response_types`] - response envelope and error rendering

pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

pub use response_types::{ApiError, ResponseWrapper};
pub use state::AppState;

use axum::error_handling::HandleErrorLayer;
use axum::BoxError;
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;

/// Create the main Axum application with all routes and middleware
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.config.server.request_timeout();

    let router = Router::new()
        .merge(routes::health_routes())
        .merge(routes::student_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ));

    with_request_timeout(router, request_timeout)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Abort handlers that run longer than `timeout`, answering with the envelope
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_layer_error))
            .layer(tower::timeout::TimeoutLayer::new(timeout)),
    )
}

async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Unhandled(err.to_string())
    }
}
