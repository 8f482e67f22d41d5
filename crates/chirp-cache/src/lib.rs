//! # chirp-cache
//!
//! Redis layer: a deadpool-managed connection pool and the request-result
//! cache that sits in front of feed and follow-stat queries.
//!
//! ```ignore
//! use chirp_cache::{create_shared_pool, RedisFeedCache, RedisPoolConfig};
//!
//! let pool = create_shared_pool(RedisPoolConfig::default())?;
//! let cache = RedisFeedCache::new(pool, CacheConfig::default());
//! ```

pub mod feed_cache;
pub mod pool;

pub use feed_cache::{
    feed_generation_key, feed_key, feed_pattern, follow_stats_generation_key, follow_stats_key,
    RedisFeedCache,
};
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};
