//! In-memory cache provider using Moka
//!
//! Provides in-process caching with TTL support for single-instance
//! deployments and tests. Each process keeps its own state, so this
//! backend is NOT distributed.
//!
//! Every entry carries its own deadline. Writes that replace a value set a
//! fresh deadline; list appends and removals keep the one already there,
//! as `RPUSH` and `LREM` do on Redis. List mutations run through moka's
//! per-key `and_compute_with`, so concurrent appends never drop items.

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::pattern::glob_match;
use crate::cache::traits::CacheService;
use crate::config::MokaConfig;
use moka::ops::compute::Op;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
enum MokaData {
    Value(String),
    List(Arc<Vec<String>>),
}

/// A stored value and the instant it stops being visible
#[derive(Debug, Clone)]
struct MokaEntry {
    data: MokaData,
    expires_at: Option<Instant>,
}

impl MokaEntry {
    fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Expires each entry at its recorded deadline
struct DeadlineExpiry;

impl Expiry<String, MokaEntry> for DeadlineExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &MokaEntry,
        created_at: Instant,
    ) -> Option<Duration> {
        value.remaining(created_at)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &MokaEntry,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.remaining(updated_at)
    }
}

/// In-memory cache service using Moka
///
/// `default_ttl` applies when a write does not name its own TTL; `None`
/// means entries only leave through eviction or explicit deletion.
#[derive(Clone)]
pub struct MokaCacheService {
    cache: moka::future::Cache<String, MokaEntry>,
    default_ttl: Option<Duration>,
}

impl std::fmt::Debug for MokaCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheService")
            .field("max_capacity", &self.cache.policy().max_capacity())
            .field("entry_count", &self.cache.entry_count())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MokaCacheService {
    /// Create a new Moka cache service from configuration
    pub fn from_config(config: &MokaConfig, default_ttl: Option<Duration>) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(DeadlineExpiry)
            .build();

        debug!(
            max_capacity = config.max_capacity,
            ttl_seconds = default_ttl.map(|ttl| ttl.as_secs()),
            "Moka in-memory cache service created"
        );

        Self { cache, default_ttl }
    }

    /// Create with explicit settings (for testing)
    pub fn new(max_capacity: u64, default_ttl: Option<Duration>) -> Self {
        Self::from_config(&MokaConfig { max_capacity }, default_ttl)
    }

    fn fresh_entry(&self, data: MokaData, ttl: Option<Duration>) -> MokaEntry {
        MokaEntry {
            data,
            expires_at: ttl.or(self.default_ttl).map(|ttl| Instant::now() + ttl),
        }
    }

    async fn get_list(&self, key: &str) -> CacheResult<Option<Arc<Vec<String>>>> {
        match self.cache.get(key).await.map(|entry| entry.data) {
            None => Ok(None),
            Some(MokaData::List(items)) => Ok(Some(items)),
            Some(MokaData::Value(_)) => Err(CacheError::WrongType {
                key: key.to_string(),
            }),
        }
    }
}

impl CacheService for MokaCacheService {
    async fn exists(&self, key: &str) -> CacheResult<bool> {
        // `get` honours expiry even before maintenance evicts the entry
        Ok(self.cache.get(key).await.is_some())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        match self.cache.get(key).await.map(|entry| entry.data) {
            Some(MokaData::Value(value)) => {
                debug!(key = key, "Cache HIT (moka)");
                Ok(Some(value))
            }
            Some(MokaData::List(_)) => Err(CacheError::WrongType {
                key: key.to_string(),
            }),
            None => {
                debug!(key = key, "Cache MISS (moka)");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let entry = self.fresh_entry(MokaData::Value(value.to_string()), ttl);
        self.cache.insert(key.to_string(), entry).await;
        debug!(key = key, "Cache SET (moka)");
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let removed = self.cache.remove(key).await.is_some();
        debug!(key = key, removed = removed, "Cache DEL (moka)");
        Ok(removed)
    }

    async fn list_replace(
        &self,
        key: &str,
        items: &[String],
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        if items.is_empty() {
            self.cache.invalidate(key).await;
        } else {
            let entry = self.fresh_entry(MokaData::List(Arc::new(items.to_vec())), ttl);
            self.cache.insert(key.to_string(), entry).await;
        }
        debug!(key = key, len = items.len(), "Cache list REPLACE (moka)");
        Ok(())
    }

    async fn list_push(&self, key: &str, item: &str) -> CacheResult<()> {
        let mut wrong_type = false;
        self.cache
            .entry(key.to_string())
            .and_compute_with(|existing| {
                let op = match existing.map(|entry| entry.into_value()) {
                    // A new list has no deadline, like RPUSH on a missing key
                    None => Op::Put(MokaEntry {
                        data: MokaData::List(Arc::new(vec![item.to_string()])),
                        expires_at: None,
                    }),
                    Some(MokaEntry {
                        data: MokaData::List(items),
                        expires_at,
                    }) => {
                        let mut items = items.as_ref().clone();
                        items.push(item.to_string());
                        Op::Put(MokaEntry {
                            data: MokaData::List(Arc::new(items)),
                            expires_at,
                        })
                    }
                    Some(_) => {
                        wrong_type = true;
                        Op::Nop
                    }
                };
                std::future::ready(op)
            })
            .await;

        if wrong_type {
            return Err(CacheError::WrongType {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn list_range(&self, key: &str) -> CacheResult<Vec<String>> {
        Ok(self
            .get_list(key)
            .await?
            .map(|items| items.as_ref().clone())
            .unwrap_or_default())
    }

    async fn list_index(&self, key: &str, index: usize) -> CacheResult<Option<String>> {
        Ok(self
            .get_list(key)
            .await?
            .and_then(|items| items.get(index).cloned()))
    }

    async fn list_remove_at(&self, key: &str, index: usize) -> CacheResult<()> {
        let mut outcome: CacheResult<()> = Ok(());
        self.cache
            .entry(key.to_string())
            .and_compute_with(|existing| {
                let op = match existing.map(|entry| entry.into_value()) {
                    Some(MokaEntry {
                        data: MokaData::List(items),
                        expires_at,
                    }) if index < items.len() => {
                        let mut items = items.as_ref().clone();
                        items.remove(index);
                        if items.is_empty() {
                            Op::Remove
                        } else {
                            Op::Put(MokaEntry {
                                data: MokaData::List(Arc::new(items)),
                                expires_at,
                            })
                        }
                    }
                    Some(MokaEntry {
                        data: MokaData::Value(_),
                        ..
                    }) => {
                        outcome = Err(CacheError::WrongType {
                            key: key.to_string(),
                        });
                        Op::Nop
                    }
                    _ => {
                        outcome = Err(CacheError::IndexOutOfRange {
                            key: key.to_string(),
                            index,
                        });
                        Op::Nop
                    }
                };
                std::future::ready(op)
            })
            .await;
        outcome
    }

    async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64> {
        let matching: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter(|(key, _)| glob_match(pattern, key.as_str()))
            .map(|(key, _)| key)
            .collect();

        let mut deleted: u64 = 0;
        for key in matching {
            if self.cache.remove(key.as_str()).await.is_some() {
                deleted += 1;
            }
        }

        debug!(pattern = pattern, deleted = deleted, "Cache pattern DEL (moka)");
        Ok(deleted)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        // In-memory cache is always healthy
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "moka"
    }

    fn is_distributed(&self) -> bool {
        false
    }
}
