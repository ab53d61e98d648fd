//! # Structured Logging Module
//!
//! Environment-aware console logging with structured helpers for student
//! mutations and cache invalidations.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// `RUST_LOG` overrides the environment default. `LOG_FORMAT=json` switches
/// console output to JSON lines. Safe to call more than once.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = std::env::var("LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let result = if json {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true).with_current_span(true))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_thread_ids(true))
                .try_init()
        };

        // A global subscriber may already be installed (tests, embedding)
        if result.is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing");
        }

        tracing::info!(
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Current environment from `STUDENT_RECORDS_ENV`, "development" when unset
pub fn get_environment() -> String {
    std::env::var("STUDENT_RECORDS_ENV").unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log a student mutation (create, update, delete)
pub fn log_student_operation(
    operation: &str,
    student_id: Option<i64>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        student_id = student_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "STUDENT_OPERATION"
    );
}

/// Log removal of a cached point or search entry
pub fn log_cache_invalidation(key: &str, reason: &str, removed: u64) {
    tracing::info!(
        key = %key,
        reason = %reason,
        removed = removed,
        "CACHE_INVALIDATION"
    );
}
