//! # Configuration
//!
//! Typed configuration for the student records service, loaded from a
//! single TOML file by [`ConfigLoader`].
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0:8080"
//! request_timeout_ms = 30000
//!
//! [database]
//! backend = "postgres"
//! url = "${DATABASE_URL:-postgresql://localhost:5432/student_records}"
//!
//! [cache]
//! enabled = true
//! backend = "redis"
//! ttl_seconds = 3600
//!
//! [cache.redis]
//! url = "${REDIS_URL:-redis://127.0.0.1:6379}"
//! ```
//!
//! Every section has defaults, so a missing section or field falls back to
//! a configuration that runs locally without external services.

pub mod error;
pub mod loader;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StudentRecordsConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub database: DatabaseConfig,

    #[validate(nested)]
    pub cache: CacheConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on (`host:port`)
    #[validate(length(min = 1))]
    pub bind_address: String,

    /// Per-request timeout enforced by the middleware stack
    #[validate(range(min = 1, max = 600000))]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Where student records are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[serde(alias = "postgresql")]
    Postgres,
    #[serde(alias = "in-memory")]
    Memory,
}

/// Record store settings
///
/// Pool fields only apply to the `postgres` backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,

    /// PostgreSQL connection URL
    #[validate(length(min = 1))]
    pub url: String,

    #[validate(range(min = 1, max = 1000))]
    pub max_connections: u32,

    #[validate(range(min = 0, max = 100))]
    pub min_connections: u32,

    #[validate(range(min = 1, max = 300))]
    pub acquire_timeout_seconds: u64,

    #[validate(range(min = 1, max = 86400))]
    pub idle_timeout_seconds: u64,

    /// Create the `student` table on start-up if it is missing
    pub ensure_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Memory,
            url: "postgresql://localhost:5432/student_records".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_seconds: 10,
            idle_timeout_seconds: 300,
            ensure_schema: true,
        }
    }
}

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    /// Redis or a wire-compatible server such as Dragonfly
    #[serde(alias = "dragonfly")]
    Redis,
    /// In-process Moka cache
    #[serde(alias = "memory", alias = "in-memory")]
    Moka,
}

/// Cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, every cache read misses and writes are discarded
    pub enabled: bool,

    pub backend: CacheBackendKind,

    /// Lifetime of every cache write; zero or negative means no expiry
    pub ttl_seconds: i64,

    #[validate(nested)]
    pub redis: Option<RedisConfig>,

    #[validate(nested)]
    pub moka: Option<MokaConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackendKind::Moka,
            ttl_seconds: 3600,
            redis: Some(RedisConfig::default()),
            moka: Some(MokaConfig::default()),
        }
    }
}

impl CacheConfig {
    /// The TTL to apply to writes, `None` when entries never expire
    pub fn ttl(&self) -> Option<Duration> {
        u64::try_from(self.ttl_seconds)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Redis connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RedisConfig {
    #[validate(length(min = 1))]
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

/// In-process cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MokaConfig {
    #[validate(range(min = 1))]
    pub max_capacity: u64,
}

impl Default for MokaConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}
