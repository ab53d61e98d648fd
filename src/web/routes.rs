//! # Web API Route Definitions

use crate::web::handlers;
use crate::web::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Student routes under `/student`
///
/// `GET /student/{name}` and `DELETE`/`PUT /student/{id}` share one path
/// segment, so they are registered on a single parameterised route; each
/// handler interprets the segment itself. The static `/student/all`
/// segment takes priority over the parameter.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/student", post(handlers::students::create_student))
        .route("/student/all", get(handlers::students::list_students))
        .route(
            "/student/:key",
            get(handlers::students::get_students_by_name)
                .put(handlers::students::update_student)
                .delete(handlers::students::delete_student),
        )
}

/// Liveness and readiness routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/ready", get(handlers::health::readiness_probe))
}
