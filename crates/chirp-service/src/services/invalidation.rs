//! Cache invalidation after mutations
//!
//! A failed invalidation is logged and swallowed. The TTL bounds how long a
//! stale entry can survive.

use chirp_core::feed::distinct_ids;
use chirp_core::Snowflake;
use tracing::{debug, warn};

use super::context::ServiceContext;

pub(crate) struct CacheInvalidator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CacheInvalidator<'a> {
    pub(crate) fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Drop every cached feed page of `viewers`
    pub(crate) async fn feeds(&self, viewers: &[Snowflake]) {
        if viewers.is_empty() {
            return;
        }
        match self.ctx.feed_cache().invalidate_feeds(viewers).await {
            Ok(()) => debug!(viewers = viewers.len(), "Feeds invalidated"),
            Err(e) => warn!(error = %e, "Failed to invalidate feeds"),
        }
    }

    /// Feeds that show posts by `author`: the author's own, each follower's,
    /// plus `actor` when someone else caused the change.
    pub(crate) async fn audience_feeds(&self, author: Snowflake, actor: Option<Snowflake>) {
        let followers = match self.ctx.follow_repo().follower_ids(author).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(author_id = %author, error = %e, "Failed to load followers for invalidation");
                Vec::new()
            }
        };

        let viewers = distinct_ids(
            std::iter::once(author)
                .chain(actor)
                .chain(followers),
        );
        self.feeds(&viewers).await;
    }

    pub(crate) async fn follow_stats(&self, users: &[Snowflake]) {
        if let Err(e) = self.ctx.feed_cache().invalidate_follow_stats(users).await {
            warn!(error = %e, "Failed to invalidate follow stats");
        }
    }
}
