//! Cache provider with enum dispatch and the process-wide TTL
//!
//! Consumers hold a `CacheProvider` and never see the concrete backend.
//! Backend failures are returned to the caller unchanged; there is no
//! fallback that hides an unreachable cache.

use super::errors::{CacheError, CacheResult};
use super::providers::NoOpCacheService;
use super::traits::CacheService;
use crate::config::{CacheBackendKind, CacheConfig};
use std::time::Duration;
use tracing::info;

#[cfg(feature = "cache-redis")]
use super::providers::RedisCacheService;

#[cfg(feature = "cache-moka")]
use super::providers::MokaCacheService;

/// Internal cache backend enum for zero-cost dispatch
#[derive(Debug, Clone)]
enum CacheBackend {
    #[cfg(feature = "cache-redis")]
    Redis(Box<RedisCacheService>),

    #[cfg(feature = "cache-moka")]
    Moka(Box<MokaCacheService>),

    /// Always miss, always succeed
    NoOp(NoOpCacheService),
}

/// Forward a call to whichever backend is active
macro_rules! dispatch {
    ($backend:expr, $svc:ident => $call:expr) => {
        match $backend {
            #[cfg(feature = "cache-redis")]
            CacheBackend::Redis($svc) => $call,
            #[cfg(feature = "cache-moka")]
            CacheBackend::Moka($svc) => $call,
            CacheBackend::NoOp($svc) => $call,
        }
    };
}

/// Unified handle over the configured cache backend
///
/// Carries the single TTL applied to every bucket and list write.
#[derive(Debug, Clone)]
pub struct CacheProvider {
    backend: CacheBackend,
    ttl: Option<Duration>,
}

impl CacheProvider {
    /// Build the provider described by `config`
    ///
    /// A disabled cache yields the NoOp backend. A configured backend that
    /// cannot be reached is an error: start-up fails instead of silently
    /// serving every request from the store.
    pub async fn from_config(config: &CacheConfig) -> CacheResult<Self> {
        let ttl = config.ttl();

        if !config.enabled {
            info!("Cache disabled by configuration");
            return Ok(Self::noop());
        }

        let backend = match config.backend {
            CacheBackendKind::Redis => Self::create_redis_backend(config).await?,
            CacheBackendKind::Moka => Self::create_moka_backend(config)?,
        };

        info!(
            backend = backend.provider_name(),
            ttl_seconds = ttl.map(|t| t.as_secs()),
            "Cache provider initialized"
        );

        Ok(Self { backend, ttl })
    }

    #[cfg(feature = "cache-redis")]
    async fn create_redis_backend(config: &CacheConfig) -> CacheResult<CacheBackend> {
        let redis_config = config.redis.as_ref().ok_or_else(|| {
            CacheError::ConfigurationError(
                "Redis cache enabled but no [cache.redis] section found".to_string(),
            )
        })?;

        let service = RedisCacheService::from_config(redis_config).await?;
        Ok(CacheBackend::Redis(Box::new(service)))
    }

    #[cfg(not(feature = "cache-redis"))]
    async fn create_redis_backend(_config: &CacheConfig) -> CacheResult<CacheBackend> {
        Err(CacheError::ConfigurationError(
            "Redis cache backend requested but 'cache-redis' feature not enabled".to_string(),
        ))
    }

    #[cfg(feature = "cache-moka")]
    fn create_moka_backend(config: &CacheConfig) -> CacheResult<CacheBackend> {
        let moka_config = config.moka.clone().unwrap_or_default();
        let service = MokaCacheService::from_config(&moka_config, config.ttl());
        Ok(CacheBackend::Moka(Box::new(service)))
    }

    #[cfg(not(feature = "cache-moka"))]
    fn create_moka_backend(_config: &CacheConfig) -> CacheResult<CacheBackend> {
        Err(CacheError::ConfigurationError(
            "Moka cache backend requested but 'cache-moka' feature not enabled".to_string(),
        ))
    }

    /// Create a NoOp provider (for explicit opt-out or testing)
    pub fn noop() -> Self {
        Self {
            backend: CacheBackend::NoOp(NoOpCacheService::new()),
            ttl: None,
        }
    }

    /// Wrap an in-process Moka cache (mainly for tests)
    #[cfg(feature = "cache-moka")]
    pub fn moka(max_capacity: u64, ttl: Option<Duration>) -> Self {
        Self {
            backend: CacheBackend::Moka(Box::new(MokaCacheService::new(max_capacity, ttl))),
            ttl,
        }
    }

    /// Check if caching is actually enabled (not NoOp)
    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::NoOp(_))
    }

    /// Whether this provider's state is shared across instances
    pub fn is_distributed(&self) -> bool {
        self.backend.is_distributed()
    }

    /// Get the provider name
    pub fn provider_name(&self) -> &'static str {
        self.backend.provider_name()
    }

    /// TTL applied to every write, `None` when entries never expire
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub async fn exists(&self, key: &str) -> CacheResult<bool> {
        dispatch!(&self.backend, s => s.exists(key).await)
    }

    pub async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        dispatch!(&self.backend, s => s.get(key).await)
    }

    /// Set a value using the provider TTL
    pub async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        dispatch!(&self.backend, s => s.set(key, value, self.ttl).await)
    }

    pub async fn delete(&self, key: &str) -> CacheResult<bool> {
        dispatch!(&self.backend, s => s.delete(key).await)
    }

    /// Replace a list using the provider TTL
    pub async fn list_replace(&self, key: &str, items: &[String]) -> CacheResult<()> {
        dispatch!(&self.backend, s => s.list_replace(key, items, self.ttl).await)
    }

    pub async fn list_push(&self, key: &str, item: &str) -> CacheResult<()> {
        dispatch!(&self.backend, s => s.list_push(key, item).await)
    }

    pub async fn list_range(&self, key: &str) -> CacheResult<Vec<String>> {
        dispatch!(&self.backend, s => s.list_range(key).await)
    }

    pub async fn list_index(&self, key: &str, index: usize) -> CacheResult<Option<String>> {
        dispatch!(&self.backend, s => s.list_index(key, index).await)
    }

    pub async fn list_remove_at(&self, key: &str, index: usize) -> CacheResult<()> {
        dispatch!(&self.backend, s => s.list_remove_at(key, index).await)
    }

    /// Delete keys matching a glob pattern (SCAN-based on Redis)
    pub async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64> {
        dispatch!(&self.backend, s => s.delete_pattern(pattern).await)
    }

    pub async fn health_check(&self) -> CacheResult<bool> {
        dispatch!(&self.backend, s => s.health_check().await)
    }
}

impl CacheBackend {
    fn is_distributed(&self) -> bool {
        dispatch!(self, s => s.is_distributed())
    }

    fn provider_name(&self) -> &'static str {
        dispatch!(self, s => s.provider_name())
    }
}
