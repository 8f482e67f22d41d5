//! Like service

use chirp_core::entities::PostLike;
use chirp_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::LikeToggleResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invalidation::CacheInvalidator;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the like state the client currently shows.
    ///
    /// `is_liked = true` removes the viewer's like, `false` adds one. State
    /// and count are read after the write, so a concurrent duplicate toggle
    /// still reports what is stored.
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        is_liked: bool,
    ) -> ServiceResult<LikeToggleResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let repo = self.ctx.like_repo();
        let changed = if is_liked {
            repo.delete(post_id, viewer_id).await?
        } else {
            repo.create(&PostLike::new(post_id, viewer_id)).await?
        };

        let liked = repo.exists(post_id, viewer_id).await?;
        let likes_count = repo.count_for_post(post_id).await?;

        info!(
            post_id = %post_id,
            user_id = %viewer_id,
            liked,
            likes_count,
            changed,
            "Like toggled"
        );

        CacheInvalidator::new(self.ctx)
            .audience_feeds(post.post.user_id, Some(viewer_id))
            .await;

        Ok(LikeToggleResponse { liked, likes_count })
    }
}
