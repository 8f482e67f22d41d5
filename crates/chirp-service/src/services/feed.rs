//! Feed service
//!
//! The home feed is every post by the viewer or someone they follow, newest
//! first, each with author, counts and like state. First pages are cached
//! per viewer and page size; cursor pages always hit the database.

use chirp_core::entities::FeedPost;
use chirp_core::feed::author_set;
use chirp_core::{PostQuery, Snowflake};
use tracing::{debug, info, instrument, warn};

use crate::dto::PostResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resolvers::hydrate_posts;
use super::retry::with_read_retry;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Home feed. Anonymous viewers get an empty list.
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        viewer_id: Option<Snowflake>,
        query: PostQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let Some(viewer_id) = viewer_id else {
            return Ok(Vec::new());
        };

        let posts = self.feed_posts(viewer_id, query).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    async fn feed_posts(&self, viewer_id: Snowflake, query: PostQuery) -> ServiceResult<Vec<FeedPost>> {
        let cacheable = query.is_first_page();
        let cache = self.ctx.feed_cache();

        if cacheable {
            match cache.get_feed(viewer_id, query.limit).await {
                Ok(Some(cached)) => {
                    debug!(viewer_id = %viewer_id, posts = cached.len(), "Feed served from cache");
                    return Ok(cached);
                }
                Ok(None) => {}
                Err(e) => warn!(viewer_id = %viewer_id, error = %e, "Feed cache read failed"),
            }
        }

        // Taken before the database read so a concurrent invalidation voids the fill
        let generation = if cacheable {
            match cache.feed_generation(viewer_id).await {
                Ok(generation) => Some(generation),
                Err(e) => {
                    warn!(viewer_id = %viewer_id, error = %e, "Feed cache generation read failed");
                    None
                }
            }
        } else {
            None
        };

        let config = self.ctx.query_config();
        let follows = self.ctx.follow_repo();
        let following = with_read_retry(config, "follows.following_ids", move || {
            follows.following_ids(viewer_id)
        })
        .await?;

        let authors = author_set(viewer_id, &following);
        let author_ids = authors.as_slice();
        let posts = self.ctx.post_repo();
        let page = with_read_retry(config, "posts.find_by_authors", move || {
            posts.find_by_authors(author_ids, query)
        })
        .await?;

        let feed = hydrate_posts(self.ctx, Some(viewer_id), page).await?;

        info!(
            viewer_id = %viewer_id,
            authors = authors.len(),
            posts = feed.len(),
            "Feed assembled"
        );

        if let Some(generation) = generation {
            match cache.put_feed(viewer_id, query.limit, generation, &feed).await {
                Ok(true) => {}
                Ok(false) => debug!(viewer_id = %viewer_id, "Feed changed during assembly, not cached"),
                Err(e) => warn!(viewer_id = %viewer_id, error = %e, "Feed cache write failed"),
            }
        }
        Ok(feed)
    }
}
