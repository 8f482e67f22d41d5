//! Follow service
//!
//! Follow toggle plus the follow-graph reads used by profile pages.

use chirp_core::entities::FollowEdge;
use chirp_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{FollowStatsResponse, FollowToggleResponse, UserSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invalidation::CacheInvalidator;
use super::resolvers::ProfileResolver;
use super::retry::with_read_retry;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the follow state the client currently shows.
    ///
    /// `is_following = true` removes the edge, `false` inserts it. The
    /// response is read back after the write.
    #[instrument(skip(self))]
    pub async fn toggle_follow(
        &self,
        viewer_id: Snowflake,
        target_id: Snowflake,
        is_following: bool,
    ) -> ServiceResult<FollowToggleResponse> {
        if viewer_id == target_id {
            return Err(DomainError::CannotFollowSelf.into());
        }
        if self.ctx.profile_repo().find_by_id(target_id).await?.is_none() {
            return Err(DomainError::UserNotFound(target_id).into());
        }

        let repo = self.ctx.follow_repo();
        let changed = if is_following {
            repo.delete(viewer_id, target_id).await?
        } else {
            repo.create(&FollowEdge::new(viewer_id, target_id)?).await?
        };
        let following = repo.exists(viewer_id, target_id).await?;

        info!(
            follower_id = %viewer_id,
            following_id = %target_id,
            following,
            changed,
            "Follow toggled"
        );

        let invalidate = CacheInvalidator::new(self.ctx);
        invalidate.feeds(&[viewer_id]).await;
        invalidate.follow_stats(&[viewer_id, target_id]).await;

        let stats = self.follow_stats(target_id).await?;
        Ok(FollowToggleResponse { following, stats })
    }

    /// Follower and following counts, served from the cache when present
    #[instrument(skip(self))]
    pub async fn follow_stats(&self, user_id: Snowflake) -> ServiceResult<FollowStatsResponse> {
        let cache = self.ctx.feed_cache();
        match cache.get_follow_stats(user_id).await {
            Ok(Some(stats)) => return Ok(stats.into()),
            Ok(None) => {}
            Err(e) => warn!(user_id = %user_id, error = %e, "Follow stats cache read failed"),
        }

        let generation = match cache.follow_stats_generation(user_id).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Follow stats generation read failed");
                None
            }
        };

        let repo = self.ctx.follow_repo();
        let stats = with_read_retry(self.ctx.query_config(), "follows.stats", move || {
            repo.stats(user_id)
        })
        .await?;

        if let Some(generation) = generation {
            if let Err(e) = cache.put_follow_stats(user_id, generation, &stats).await {
                warn!(user_id = %user_id, error = %e, "Follow stats cache write failed");
            }
        }
        Ok(stats.into())
    }

    #[instrument(skip(self))]
    pub async fn is_following(&self, viewer_id: Snowflake, target_id: Snowflake) -> ServiceResult<bool> {
        let repo = self.ctx.follow_repo();
        with_read_retry(self.ctx.query_config(), "follows.exists", move || {
            repo.exists(viewer_id, target_id)
        })
        .await
    }

    /// Users following `user_id`
    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: Snowflake) -> ServiceResult<Vec<UserSummaryResponse>> {
        let repo = self.ctx.follow_repo();
        let ids = with_read_retry(self.ctx.query_config(), "follows.follower_ids", move || {
            repo.follower_ids(user_id)
        })
        .await?;
        self.summaries(ids).await
    }

    /// Users `user_id` follows
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserSummaryResponse>> {
        let repo = self.ctx.follow_repo();
        let ids = with_read_retry(self.ctx.query_config(), "follows.following_ids", move || {
            repo.following_ids(user_id)
        })
        .await?;
        self.summaries(ids).await
    }

    async fn summaries(&self, ids: Vec<Snowflake>) -> ServiceResult<Vec<UserSummaryResponse>> {
        let mut authors = ProfileResolver::new(self.ctx).resolve(ids.iter().copied()).await?;
        Ok(ids
            .into_iter()
            .filter_map(|id| authors.remove(&id))
            .map(UserSummaryResponse::from)
            .collect())
    }
}
