//! Redis (or Dragonfly) cache backend
//!
//! Point entries are plain strings, search entries are Redis lists. Only
//! built with the `cache-redis` feature.

use crate::cache::errors::{CacheError, CacheResult};
use crate::cache::traits::CacheService;
use crate::config::RedisConfig;
use std::time::Duration;
use tracing::debug;

/// Placeholder written over a list slot before `LREM` removes it.
///
/// Redis has no remove-by-index, so the slot is overwritten with a value
/// no serialized JSON document can equal and then removed by value.
const LIST_TOMBSTONE: &str = "\u{0}__student_records_deleted__\u{0}";

/// Cache service over a reconnecting `ConnectionManager`
#[derive(Clone)]
pub struct RedisCacheService {
    connection_manager: redis::aio::ConnectionManager,
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("connection_manager", &"ConnectionManager")
            .finish()
    }
}

impl RedisCacheService {
    /// Connect to `config.url`; fails if the server cannot be reached
    pub async fn from_config(config: &RedisConfig) -> CacheResult<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let connection_manager = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| {
                CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
            })?;

        debug!(url = %redact_url(&config.url), "Redis cache service connected");

        Ok(Self { connection_manager })
    }
}

fn backend_error(command: &str, err: redis::RedisError) -> CacheError {
    if err.is_timeout() {
        CacheError::Timeout(format!("Redis {command} timed out: {err}"))
    } else if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
        CacheError::ConnectionError(format!("Redis {command} failed: {err}"))
    } else if err.kind() == redis::ErrorKind::TypeError {
        CacheError::BackendError(format!("Redis {command} hit a value of the wrong type: {err}"))
    } else {
        CacheError::BackendError(format!("Redis {command} failed: {err}"))
    }
}

impl CacheService for RedisCacheService {
    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection_manager.clone();
        let count: u64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("EXISTS", e))?;
        Ok(count > 0)
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection_manager.clone();
        let result: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("GET", e))?;

        if result.is_some() {
            debug!(key = key, "Cache HIT");
        } else {
            debug!(key = key, "Cache MISS");
        }

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }

        cmd.query_async::<()>(&mut conn)
            .await
            .map_err(|e| backend_error("SET", e))?;

        debug!(key = key, ttl_seconds = ttl.map(|t| t.as_secs()), "Cache SET");
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection_manager.clone();

        let removed: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("DEL", e))?;

        debug!(key = key, removed = removed, "Cache DEL");
        Ok(removed > 0)
    }

    async fn list_replace(
        &self,
        key: &str,
        items: &[String],
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let mut pipe = redis::pipe();
        pipe.atomic().cmd("DEL").arg(key).ignore();
        if !items.is_empty() {
            pipe.cmd("RPUSH").arg(key).arg(items).ignore();
            if let Some(ttl) = ttl {
                pipe.cmd("EXPIRE").arg(key).arg(ttl.as_secs().max(1)).ignore();
            }
        }

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| backend_error("list replace", e))?;

        debug!(key = key, len = items.len(), "Cache list REPLACE");
        Ok(())
    }

    async fn list_push(&self, key: &str, item: &str) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        redis::cmd("RPUSH")
            .arg(key)
            .arg(item)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| backend_error("RPUSH", e))?;
        Ok(())
    }

    async fn list_range(&self, key: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.connection_manager.clone();
        let items: Vec<String> = redis::cmd("LRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("LRANGE", e))?;
        Ok(items)
    }

    async fn list_index(&self, key: &str, index: usize) -> CacheResult<Option<String>> {
        let mut conn = self.connection_manager.clone();
        let item: Option<String> = redis::cmd("LINDEX")
            .arg(key)
            .arg(index)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("LINDEX", e))?;
        Ok(item)
    }

    async fn list_remove_at(&self, key: &str, index: usize) -> CacheResult<()> {
        let mut conn = self.connection_manager.clone();
        let len: usize = redis::cmd("LLEN")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("LLEN", e))?;
        if index >= len {
            return Err(CacheError::IndexOutOfRange {
                key: key.to_string(),
                index,
            });
        }

        redis::pipe()
            .atomic()
            .cmd("LSET")
            .arg(key)
            .arg(index)
            .arg(LIST_TOMBSTONE)
            .ignore()
            .cmd("LREM")
            .arg(key)
            .arg(1)
            .arg(LIST_TOMBSTONE)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| backend_error("list remove", e))?;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64> {
        let mut conn = self.connection_manager.clone();
        let mut deleted: u64 = 0;
        let mut cursor: u64 = 0;

        // SCAN in batches; KEYS would block the server
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .map_err(|e| backend_error("SCAN", e))?;

            if !keys.is_empty() {
                let count: u64 = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| backend_error("DEL (batch)", e))?;
                deleted += count;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!(pattern = pattern, deleted = deleted, "Cache pattern DEL");
        Ok(deleted)
    }

    async fn health_check(&self) -> CacheResult<bool> {
        let mut conn = self.connection_manager.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| backend_error("PING", e))?;

        Ok(pong == "PONG")
    }

    fn provider_name(&self) -> &'static str {
        "redis"
    }

    fn is_distributed(&self) -> bool {
        true
    }
}

/// Redact credentials from a Redis URL before logging it
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
