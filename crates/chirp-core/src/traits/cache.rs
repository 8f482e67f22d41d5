//! Request-result cache port
//!
//! Callers treat every error from a [`FeedCache`] as a miss: the cache must
//! never decide whether a request succeeds.

use async_trait::async_trait;

use super::RepoResult;
use crate::entities::{FeedPost, FollowStats};
use crate::value_objects::Snowflake;

/// Fill generation of a cache entry group
///
/// Read it before loading the value that will be stored; a store is refused
/// once an invalidation has bumped the generation in between, so a reader
/// racing a mutation cannot write back a page from before it.
pub type CacheGeneration = u64;

#[async_trait]
pub trait FeedCache: Send + Sync {
    /// Cached first page of a viewer's feed
    async fn get_feed(&self, viewer_id: Snowflake, limit: i64) -> RepoResult<Option<Vec<FeedPost>>>;

    async fn feed_generation(&self, viewer_id: Snowflake) -> RepoResult<CacheGeneration>;

    /// Store a first page unless the viewer's feeds were invalidated after
    /// `generation` was read. Returns whether the page was stored.
    async fn put_feed(
        &self,
        viewer_id: Snowflake,
        limit: i64,
        generation: CacheGeneration,
        feed: &[FeedPost],
    ) -> RepoResult<bool>;

    /// Bump the viewers' feed generation and drop every cached page
    async fn invalidate_feeds(&self, viewer_ids: &[Snowflake]) -> RepoResult<()>;

    async fn get_follow_stats(&self, user_id: Snowflake) -> RepoResult<Option<FollowStats>>;

    async fn follow_stats_generation(&self, user_id: Snowflake) -> RepoResult<CacheGeneration>;

    async fn put_follow_stats(
        &self,
        user_id: Snowflake,
        generation: CacheGeneration,
        stats: &FollowStats,
    ) -> RepoResult<bool>;

    async fn invalidate_follow_stats(&self, user_ids: &[Snowflake]) -> RepoResult<()>;
}
