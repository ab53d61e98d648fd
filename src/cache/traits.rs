//! Cache service trait definition

use super::errors::CacheResult;
use std::time::Duration;

/// Raw key-value operations a cache backend must provide
///
/// Values are opaque strings; typing happens in [`crate::cache::TypedCache`].
/// A key holds either a single value (a "bucket") or an ordered list.
/// `ttl` of `None` means the entry never expires.
pub trait CacheService: Send + Sync {
    /// Check whether any value is stored under `key`
    fn exists(&self, key: &str) -> impl std::future::Future<Output = CacheResult<bool>> + Send;

    /// Get a single value by key
    ///
    /// Returns `Ok(Some(value))` on cache hit, `Ok(None)` on cache miss.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = CacheResult<Option<String>>> + Send;

    /// Set a single value, optionally with a TTL
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;

    /// Delete a specific key, returning whether it existed
    fn delete(&self, key: &str) -> impl std::future::Future<Output = CacheResult<bool>> + Send;

    /// Replace the list stored at `key` with `items`
    ///
    /// An empty `items` leaves no key behind.
    fn list_replace(
        &self,
        key: &str,
        items: &[String],
        ttl: Option<Duration>,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;

    /// Append one item to the list at `key`, creating it if absent
    fn list_push(
        &self,
        key: &str,
        item: &str,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;

    /// Read the whole list at `key` (empty when absent)
    fn list_range(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = CacheResult<Vec<String>>> + Send;

    /// Read one list item by position
    fn list_index(
        &self,
        key: &str,
        index: usize,
    ) -> impl std::future::Future<Output = CacheResult<Option<String>>> + Send;

    /// Remove one list item by position
    fn list_remove_at(
        &self,
        key: &str,
        index: usize,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;

    /// Delete all keys matching a glob pattern, returning how many were removed
    fn delete_pattern(
        &self,
        pattern: &str,
    ) -> impl std::future::Future<Output = CacheResult<u64>> + Send;

    /// Check if the cache backend is healthy
    fn health_check(&self) -> impl std::future::Future<Output = CacheResult<bool>> + Send;

    /// Get the name of the cache provider
    fn provider_name(&self) -> &'static str;

    /// Whether state is shared across processes
    fn is_distributed(&self) -> bool;
}
