//! Redis request-result cache for feeds and follow stats
//!
//! Keys:
//! - `feed:{viewer_id}:{limit}` - first feed page for a viewer at one page size
//! - `follow_stats:{user_id}` - follower/following counts
//! - `feed_gen:{viewer_id}`, `follow_stats_gen:{user_id}` - fill generations
//!
//! Every entry carries a TTL, and mutations invalidate explicitly on top of that.
//! Invalidation bumps the generation before deleting, and fills are a Lua
//! compare-and-set against the generation read before the database query.

use async_trait::async_trait;
use tracing::{debug, instrument};

use chirp_common::CacheConfig;
use chirp_core::entities::{FeedPost, FollowStats};
use chirp_core::error::DomainError;
use chirp_core::traits::{CacheGeneration, FeedCache, RepoResult};
use chirp_core::value_objects::Snowflake;

use crate::pool::{RedisPoolError, SharedRedisPool};

const FEED_PREFIX: &str = "feed:";
const FOLLOW_STATS_PREFIX: &str = "follow_stats:";
const FEED_GEN_PREFIX: &str = "feed_gen:";
const FOLLOW_STATS_GEN_PREFIX: &str = "follow_stats_gen:";

/// Generation counters outlive every entry they guard
const GENERATION_TTL_SECONDS: u64 = 86_400;

/// SCAN batch hint when collecting a viewer's feed pages
const SCAN_COUNT: usize = 100;

pub fn feed_key(viewer_id: Snowflake, limit: i64) -> String {
    format!("{FEED_PREFIX}{viewer_id}:{limit}")
}

/// Matches every page size cached for the viewer
pub fn feed_pattern(viewer_id: Snowflake) -> String {
    format!("{FEED_PREFIX}{viewer_id}:*")
}

pub fn follow_stats_key(user_id: Snowflake) -> String {
    format!("{FOLLOW_STATS_PREFIX}{user_id}")
}

pub fn feed_generation_key(viewer_id: Snowflake) -> String {
    format!("{FEED_GEN_PREFIX}{viewer_id}")
}

pub fn follow_stats_generation_key(user_id: Snowflake) -> String {
    format!("{FOLLOW_STATS_GEN_PREFIX}{user_id}")
}

fn cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

/// [`FeedCache`] backed by Redis
#[derive(Debug, Clone)]
pub struct RedisFeedCache {
    pool: SharedRedisPool,
    config: CacheConfig,
}

impl RedisFeedCache {
    pub fn new(pool: SharedRedisPool, config: CacheConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl FeedCache for RedisFeedCache {
    #[instrument(skip(self))]
    async fn get_feed(&self, viewer_id: Snowflake, limit: i64) -> RepoResult<Option<Vec<FeedPost>>> {
        let key = feed_key(viewer_id, limit);
        let cached = self.pool.get_value(&key).await.map_err(cache_error)?;
        debug!(%key, hit = cached.is_some(), "feed cache lookup");
        Ok(cached)
    }

    #[instrument(skip(self))]
    async fn feed_generation(&self, viewer_id: Snowflake) -> RepoResult<CacheGeneration> {
        self.pool
            .get_counter(&feed_generation_key(viewer_id))
            .await
            .map_err(cache_error)
    }

    #[instrument(skip(self, feed), fields(posts = feed.len()))]
    async fn put_feed(
        &self,
        viewer_id: Snowflake,
        limit: i64,
        generation: CacheGeneration,
        feed: &[FeedPost],
    ) -> RepoResult<bool> {
        let stored = self
            .pool
            .set_if_counter(
                &feed_generation_key(viewer_id),
                &feed_key(viewer_id, limit),
                feed,
                self.config.feed_ttl_seconds,
                generation,
            )
            .await
            .map_err(cache_error)?;
        if !stored {
            debug!(%viewer_id, generation, "feed invalidated during fill, not stored");
        }
        Ok(stored)
    }

    #[instrument(skip(self, viewer_ids), fields(viewers = viewer_ids.len()))]
    async fn invalidate_feeds(&self, viewer_ids: &[Snowflake]) -> RepoResult<()> {
        let generations: Vec<String> = viewer_ids.iter().copied().map(feed_generation_key).collect();
        self.pool
            .bump_counters(&generations, GENERATION_TTL_SECONDS)
            .await
            .map_err(cache_error)?;

        let mut keys = Vec::new();
        for viewer_id in viewer_ids {
            let found = self
                .pool
                .scan_keys(&feed_pattern(*viewer_id), SCAN_COUNT)
                .await
                .map_err(cache_error)?;
            keys.extend(found);
        }

        let deleted = self.pool.delete_many(&keys).await.map_err(cache_error)?;
        debug!(deleted, "feed cache invalidated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_follow_stats(&self, user_id: Snowflake) -> RepoResult<Option<FollowStats>> {
        self.pool
            .get_value(&follow_stats_key(user_id))
            .await
            .map_err(cache_error)
    }

    #[instrument(skip(self))]
    async fn follow_stats_generation(&self, user_id: Snowflake) -> RepoResult<CacheGeneration> {
        self.pool
            .get_counter(&follow_stats_generation_key(user_id))
            .await
            .map_err(cache_error)
    }

    #[instrument(skip(self))]
    async fn put_follow_stats(
        &self,
        user_id: Snowflake,
        generation: CacheGeneration,
        stats: &FollowStats,
    ) -> RepoResult<bool> {
        self.pool
            .set_if_counter(
                &follow_stats_generation_key(user_id),
                &follow_stats_key(user_id),
                stats,
                self.config.stats_ttl_seconds,
                generation,
            )
            .await
            .map_err(cache_error)
    }

    #[instrument(skip(self))]
    async fn invalidate_follow_stats(&self, user_ids: &[Snowflake]) -> RepoResult<()> {
        let generations: Vec<String> =
            user_ids.iter().copied().map(follow_stats_generation_key).collect();
        self.pool
            .bump_counters(&generations, GENERATION_TTL_SECONDS)
            .await
            .map_err(cache_error)?;

        let keys: Vec<String> = user_ids.iter().copied().map(follow_stats_key).collect();
        self.pool.delete_many(&keys).await.map_err(cache_error)?;
        Ok(())
    }
}
