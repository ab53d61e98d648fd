//! No-op cache provider
//!
//! Always returns None/success. Used when caching is disabled by configuration.

use crate::cache::errors::CacheResult;
use crate::cache::traits::CacheService;
use std::time::Duration;

/// No-op cache service that never caches anything
///
/// All reads miss, all writes succeed silently.
#[derive(Debug, Clone, Default)]
pub struct NoOpCacheService;

impl NoOpCacheService {
    /// Create a new no-op cache service
    pub fn new() -> Self {
        Self
    }
}

impl CacheService for NoOpCacheService {
    async fn exists(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<bool> {
        Ok(false)
    }

    async fn list_replace(
        &self,
        _key: &str,
        _items: &[String],
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn list_push(&self, _key: &str, _item: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn list_range(&self, _key: &str) -> CacheResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_index(&self, _key: &str, _index: usize) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn list_remove_at(&self, _key: &str, _index: usize) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_pattern(&self, _pattern: &str) -> CacheResult<u64> {
        Ok(0)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "noop"
    }

    fn is_distributed(&self) -> bool {
        // No state at all, so nothing can diverge between instances
        true
    }
}
