//! Student Records Server
//!
//! Loads configuration, connects the record store and cache, and serves the
//! HTTP API until Ctrl+C or SIGTERM.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use student_records::cache::CacheProvider;
use student_records::config::ConfigLoader;
use student_records::database::build_store;
use student_records::logging;
use student_records::web::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!("Starting Student Records Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "   Build Mode: {}",
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    let config = ConfigLoader::load_from_env().context("Failed to load configuration")?;

    let store = build_store(&config.database)
        .await
        .context("Failed to initialize student store")?;

    // An unreachable cache is fatal: there is no store-only mode
    let cache = CacheProvider::from_config(&config.cache)
        .await
        .context("Failed to initialize cache provider")?;
    info!(
        "   Cache: {} (enabled: {}, distributed: {}, ttl: {:?})",
        cache.provider_name(),
        cache.is_enabled(),
        cache.is_distributed(),
        cache.ttl()
    );

    let bind_address = config.server.bind_address.clone();
    let app = create_app(AppState::new(config, store, cache));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    info!("   Listening on: {}", bind_address);
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Student Records Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
