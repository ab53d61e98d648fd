//! # Database Operations
//!
//! The record store boundary and its two implementations.
//!
//! - [`store`] - the [`StudentStore`] trait
//! - [`postgres`] - sqlx-backed store over a `PgPool`
//! - [`memory`] - in-process store for local runs and tests
//! - [`connection`] - pool construction from configuration

pub mod connection;
pub mod errors;
pub mod memory;
pub mod postgres;
pub mod store;

pub use connection::DatabaseConnection;
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStudentStore;
pub use postgres::PgStudentStore;
pub use store::StudentStore;

use crate::config::{DatabaseBackend, DatabaseConfig};
use std::sync::Arc;
use tracing::info;

/// Build the configured record store
///
/// For PostgreSQL this connects the pool and, when `ensure_schema` is set,
/// creates the `student` table.
pub async fn build_store(config: &DatabaseConfig) -> StoreResult<Arc<dyn StudentStore>> {
    match config.backend {
        DatabaseBackend::Memory => {
            info!("Using in-memory student store");
            Ok(Arc::new(InMemoryStudentStore::new()))
        }
        DatabaseBackend::Postgres => {
            let connection = DatabaseConnection::connect(config).await?;
            let store = PgStudentStore::new(connection.into_pool());
            if config.ensure_schema {
                store.ensure_schema().await?;
            }
            info!(
                max_connections = config.max_connections,
                "Using PostgreSQL student store"
            );
            Ok(Arc::new(store))
        }
    }
}
