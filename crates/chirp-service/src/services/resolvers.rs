//! Batch resolvers shared by the feed, post and comment paths

use std::collections::{HashMap, HashSet};

use chirp_core::entities::{AuthorProfile, FeedPost, PostWithCounts};
use chirp_core::feed::{assemble_feed, distinct_ids, resolve_authors};
use chirp_core::Snowflake;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::retry::with_read_retry;

/// Maps author ids to display profiles in one query
pub struct ProfileResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every id in `ids` gets an entry; ids without a profile get the
    /// "Unknown User" placeholder instead of failing the batch.
    #[instrument(skip(self, ids))]
    pub async fn resolve(
        &self,
        ids: impl IntoIterator<Item = Snowflake>,
    ) -> ServiceResult<HashMap<Snowflake, AuthorProfile>> {
        let ids = distinct_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let repo = self.ctx.profile_repo();
        let wanted = ids.as_slice();
        let found = with_read_retry(self.ctx.query_config(), "profiles.find_by_ids", move || {
            repo.find_by_ids(wanted)
        })
        .await?;

        if found.len() < ids.len() {
            debug!(
                requested = ids.len(),
                found = found.len(),
                "Some authors resolved to placeholder"
            );
        }

        Ok(resolve_authors(&ids, &found))
    }
}

/// Answers "has the viewer liked this post" for a batch of posts
pub struct LikeStateResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeStateResolver<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Anonymous viewers have liked nothing
    #[instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    pub async fn liked_posts(
        &self,
        viewer_id: Option<Snowflake>,
        post_ids: &[Snowflake],
    ) -> ServiceResult<HashSet<Snowflake>> {
        let Some(viewer_id) = viewer_id else {
            return Ok(HashSet::new());
        };
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let repo = self.ctx.like_repo();
        let liked = with_read_retry(self.ctx.query_config(), "likes.liked_post_ids", move || {
            repo.liked_post_ids(viewer_id, post_ids)
        })
        .await?;

        Ok(liked.into_iter().collect())
    }
}

/// Attach authors and the viewer's like state to a page of posts, keeping order
pub(crate) async fn hydrate_posts(
    ctx: &ServiceContext,
    viewer_id: Option<Snowflake>,
    posts: Vec<PostWithCounts>,
) -> ServiceResult<Vec<FeedPost>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids: Vec<Snowflake> = posts.iter().map(|item| item.post.user_id).collect();
    let post_ids: Vec<Snowflake> = posts.iter().map(|item| item.post.id).collect();

    let authors = ProfileResolver::new(ctx).resolve(author_ids).await?;
    let liked = LikeStateResolver::new(ctx)
        .liked_posts(viewer_id, &post_ids)
        .await?;

    Ok(assemble_feed(posts, &authors, &liked))
}
