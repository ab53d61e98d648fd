//! Typed key/value and list stores on top of the cache provider
//!
//! The facade depends on three narrow capabilities instead of the raw
//! provider: single-value buckets, ordered lists, and pattern deletion.
//! `TypedCache` implements all three for any serde type, storing each
//! value (and each list element) as a JSON document.

use super::errors::{CacheError, CacheResult};
use super::provider::CacheProvider;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;

/// Single value stored under a key
pub trait BucketStore<T>: Send + Sync {
    fn bucket_exists(&self, key: &str) -> impl Future<Output = CacheResult<bool>> + Send;

    fn get_bucket(&self, key: &str) -> impl Future<Output = CacheResult<Option<T>>> + Send;

    /// Write `value`, applying the process-wide TTL
    fn save_bucket(&self, key: &str, value: &T) -> impl Future<Output = CacheResult<()>> + Send;

    /// Returns whether a value was present
    fn delete_bucket(&self, key: &str) -> impl Future<Output = CacheResult<bool>> + Send;
}

/// Ordered sequence of values stored under a key
pub trait ListStore<T>: Send + Sync {
    fn list_exists(&self, key: &str) -> impl Future<Output = CacheResult<bool>> + Send;

    /// All elements in stored order, empty when the key is absent
    fn get_list(&self, key: &str) -> impl Future<Output = CacheResult<Vec<T>>> + Send;

    /// Replace the whole list, applying the process-wide TTL
    ///
    /// Saving an empty list leaves the key absent.
    fn save_list(&self, key: &str, items: &[T]) -> impl Future<Output = CacheResult<()>> + Send;

    /// Append one element; the key's remaining TTL is left untouched
    fn append_item(&self, key: &str, item: &T) -> impl Future<Output = CacheResult<()>> + Send;

    fn get_item(
        &self,
        key: &str,
        index: usize,
    ) -> impl Future<Output = CacheResult<Option<T>>> + Send;

    fn delete_item(&self, key: &str, index: usize) -> impl Future<Output = CacheResult<()>> + Send;
}

/// Bulk deletion by glob pattern
pub trait KeyPatternStore: Send + Sync {
    /// Delete every key matching `pattern`, returning how many were removed
    fn delete_keys_by_pattern(&self, pattern: &str)
        -> impl Future<Output = CacheResult<u64>> + Send;
}

/// JSON-serializing view of a `CacheProvider` for values of type `T`
pub struct TypedCache<T> {
    provider: CacheProvider,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedCache<T> {
    pub fn new(provider: CacheProvider) -> Self {
        Self {
            provider,
            _marker: PhantomData,
        }
    }

    pub fn provider(&self) -> &CacheProvider {
        &self.provider
    }
}

impl<T> Clone for TypedCache<T> {
    fn clone(&self) -> Self {
        Self::new(self.provider.clone())
    }
}

impl<T> std::fmt::Debug for TypedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedCache")
            .field("provider", &self.provider.provider_name())
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

fn encode<T: Serialize>(value: &T) -> CacheResult<String> {
    serde_json::to_string(value).map_err(CacheError::from)
}

fn decode<T: DeserializeOwned>(raw: &str) -> CacheResult<T> {
    serde_json::from_str(raw).map_err(CacheError::from)
}

impl<T> BucketStore<T> for TypedCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn bucket_exists(&self, key: &str) -> CacheResult<bool> {
        self.provider.exists(key).await
    }

    async fn get_bucket(&self, key: &str) -> CacheResult<Option<T>> {
        match self.provider.get(key).await? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save_bucket(&self, key: &str, value: &T) -> CacheResult<()> {
        let raw = encode(value)?;
        self.provider.set(key, &raw).await
    }

    async fn delete_bucket(&self, key: &str) -> CacheResult<bool> {
        self.provider.delete(key).await
    }
}

impl<T> ListStore<T> for TypedCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn list_exists(&self, key: &str) -> CacheResult<bool> {
        self.provider.exists(key).await
    }

    async fn get_list(&self, key: &str) -> CacheResult<Vec<T>> {
        self.provider
            .list_range(key)
            .await?
            .iter()
            .map(|raw| decode(raw))
            .collect()
    }

    async fn save_list(&self, key: &str, items: &[T]) -> CacheResult<()> {
        let encoded = items.iter().map(encode).collect::<CacheResult<Vec<_>>>()?;
        self.provider.list_replace(key, &encoded).await
    }

    async fn append_item(&self, key: &str, item: &T) -> CacheResult<()> {
        let raw = encode(item)?;
        self.provider.list_push(key, &raw).await
    }

    async fn get_item(&self, key: &str, index: usize) -> CacheResult<Option<T>> {
        match self.provider.list_index(key, index).await? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_item(&self, key: &str, index: usize) -> CacheResult<()> {
        self.provider.list_remove_at(key, index).await
    }
}

impl<T> KeyPatternStore for TypedCache<T>
where
    T: Send + Sync,
{
    async fn delete_keys_by_pattern(&self, pattern: &str) -> CacheResult<u64> {
        self.provider.delete_pattern(pattern).await
    }
}
