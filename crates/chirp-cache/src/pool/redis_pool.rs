//! Redis connection pool using deadpool-redis.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379`)
    pub url: String,
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 10,
        }
    }
}

impl From<&chirp_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &chirp_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// SET `KEYS[2]` only while the counter at `KEYS[1]` still equals `ARGV[1]`.
/// A missing counter reads as 0.
const SET_IF_COUNTER: &str = r"
    if (redis.call('GET', KEYS[1]) or '0') ~= ARGV[1] then
        return 0
    end
    redis.call('SET', KEYS[2], ARGV[2], 'EX', ARGV[3])
    return 1
";

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

/// Host part of a Redis URL, without credentials
fn redacted(url: &str) -> &str {
    url.rsplit('@').next().unwrap_or(url)
}

impl RedisPool {
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        tracing::info!(
            url = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &chirp_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(RedisPoolError::GetConnection)
    }

    /// PING round-trip
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Read a JSON value
    pub async fn get_value<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(RedisPoolError::from)
    }

    /// Current value of a counter key; missing counts as 0
    pub async fn get_counter(&self, key: &str) -> RedisResult<u64> {
        let mut conn = self.get().await?;
        let value: Option<u64> = conn.get(key).await?;
        Ok(value.unwrap_or(0))
    }

    /// INCR every counter and refresh its TTL, in one MULTI/EXEC
    pub async fn bump_counters<K: AsRef<str>>(&self, keys: &[K], ttl_seconds: u64) -> RedisResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in keys {
            pipe.cmd("INCR").arg(key.as_ref()).ignore();
            pipe.cmd("EXPIRE").arg(key.as_ref()).arg(ttl_seconds).ignore();
        }
        let mut conn = self.get().await?;
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON with a TTL unless `counter_key` moved away from
    /// `expected`. Returns whether the value was written.
    pub async fn set_if_counter<V: Serialize + ?Sized>(
        &self,
        counter_key: &str,
        key: &str,
        value: &V,
        ttl_seconds: u64,
        expected: u64,
    ) -> RedisResult<bool> {
        let serialized = serde_json::to_string(value)?;
        let mut conn = self.get().await?;
        let stored: i64 = redis::Script::new(SET_IF_COUNTER)
            .key(counter_key)
            .key(key)
            .arg(expected)
            .arg(serialized)
            .arg(ttl_seconds)
            .invoke_async(&mut conn)
            .await?;
        Ok(stored == 1)
    }

    /// Delete keys, returning how many existed
    pub async fn delete_many<K: AsRef<str>>(&self, keys: &[K]) -> RedisResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
        let mut conn = self.get().await?;
        let deleted: usize = conn.del(keys).await?;
        Ok(deleted)
    }

    /// Cursor-based SCAN; never blocks Redis the way KEYS does
    pub async fn scan_keys(&self, pattern: &str, count: usize) -> RedisResult<Vec<String>> {
        let mut conn = self.get().await?;
        let mut cursor: u64 = 0;
        let mut all_keys = Vec::new();

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(count)
                .query_async(&mut conn)
                .await?;

            all_keys.extend(keys);
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(all_keys)
    }
}

/// Shared Redis pool wrapped in Arc for easy cloning
pub type SharedRedisPool = Arc<RedisPool>;

pub fn create_shared_pool(config: RedisPoolConfig) -> RedisResult<SharedRedisPool> {
    Ok(Arc::new(RedisPool::new(config)?))
}
